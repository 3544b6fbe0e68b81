use reqwest::StatusCode;
use thiserror::Error;

/// Error substrings that mark a failed attempt as eligible for key rotation.
/// Quota, permission and malformed-key rejections all surface one of these.
const RETRYABLE_MARKERS: [&str; 4] = ["429", "403", "400", "RESOURCE_EXHAUSTED"];

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The message text and image list were both empty.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// The provider answered but returned no usable text.
    #[error("empty response from model")]
    EmptyResponse,

    /// Every configured key was tried and rejected.
    #[error("all API keys exhausted, update the configured key list")]
    KeysExhausted,

    /// Non-success HTTP response from the Gemini API.
    #[error("Gemini API error {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Transport failure or undecodable response body.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl DispatchError {
    /// Whether this failure should advance to the next API key.
    ///
    /// Classification is by substring inspection of the error's display form,
    /// so a provider status token buried in the response body (e.g.
    /// `RESOURCE_EXHAUSTED`) counts the same as the HTTP status code.
    pub fn is_retryable(&self) -> bool {
        match self {
            DispatchError::EmptyMessage
            | DispatchError::EmptyResponse
            | DispatchError::KeysExhausted => false,
            other => {
                let description = other.to_string();
                RETRYABLE_MARKERS.iter().any(|m| description.contains(m))
            }
        }
    }
}
