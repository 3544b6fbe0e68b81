use serde::{Deserialize, Serialize};

/// Role tag of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One prior turn of the conversation. Part order is preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub parts: Vec<HistoryPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPart {
    pub text: String,
}

impl HistoryEntry {
    /// Create a user turn with a single text part
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            parts: vec![HistoryPart { text: text.into() }],
        }
    }

    /// Create a model turn with a single text part
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            parts: vec![HistoryPart { text: text.into() }],
        }
    }
}

/// An inline image accompanying the current message: base64-encoded bytes
/// plus the MIME type the provider should decode them as.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAttachment {
    pub data: String,
    pub mime_type: String,
}
