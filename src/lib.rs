//! Client-side adapter for the Gemini `generateContent` API with API-key
//! rotation: a failed attempt on a quota/auth error retries the same request
//! with the next configured key until one succeeds or the list is exhausted.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gemini;
pub mod logging;
pub mod models;

pub use client::GeminiClient;
pub use config::DispatchConfig;
pub use dispatcher::dispatch;
pub use error::DispatchError;
pub use models::{ChatRole, HistoryEntry, HistoryPart, ImageAttachment};
