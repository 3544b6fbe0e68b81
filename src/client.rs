use crate::error::DispatchError;
use crate::gemini::{GeminiRequest, GeminiResponse};
use std::sync::Arc;
use tracing::{debug, warn};

/// Model identifier used for every dispatch.
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";

/// Production endpoint; tests point `with_api_base` at a local mock server.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug)]
pub struct GeminiClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
}

impl GeminiClient {
    pub fn new(http_client: Arc<reqwest::Client>) -> Self {
        Self::with_api_base(http_client, DEFAULT_API_BASE)
    }

    pub fn with_api_base(http_client: Arc<reqwest::Client>, api_base: impl Into<String>) -> Self {
        Self {
            http_client,
            api_base: api_base.into(),
        }
    }

    fn build_target_url(&self, api_key: &str) -> String {
        let api_base = &self.api_base;
        let path = format!("models/{}:generateContent", GEMINI_MODEL);
        let base = if api_base.ends_with('/') {
            format!("{}{}", api_base, path)
        } else {
            format!("{}/{}", api_base, path)
        };
        format!("{}?key={}", base, api_key)
    }

    /// Single delivery attempt with one API key. Returns the generated text,
    /// or an error for the dispatcher to classify.
    pub async fn generate_content(
        &self,
        request: &GeminiRequest,
        api_key: &str,
    ) -> Result<String, DispatchError> {
        let target_url = self.build_target_url(api_key);
        debug!(model = GEMINI_MODEL, "Sending generateContent request");
        if let Ok(body) = serde_json::to_string(request) {
            debug!("request body: {}", body);
        }

        let response = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Api { status, body });
        }

        let response: GeminiResponse = response.json().await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                prompt_tokens = ?usage.prompt_token_count,
                candidate_tokens = ?usage.candidates_token_count,
                total_tokens = ?usage.total_token_count,
                "Token usage"
            );
        }

        match response.text() {
            Some(text) => Ok(text),
            None => {
                if let Some(feedback) = &response.prompt_feedback {
                    warn!(block_reason = ?feedback.block_reason, "Prompt was blocked by the provider");
                }
                Err(DispatchError::EmptyResponse)
            }
        }
    }
}
