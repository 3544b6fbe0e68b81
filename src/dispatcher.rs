use crate::client::GeminiClient;
use crate::config::DispatchConfig;
use crate::error::DispatchError;
use crate::gemini::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest};
use crate::models::{ChatRole, HistoryEntry, ImageAttachment};
use tracing::warn;

/// Opening turn that primes the model to treat the next turn as its role.
const INIT_PROMPT: &str = "System initialization. Understand your role.";

// Fixed generation parameters, applied to every dispatch.
const TEMPERATURE: f64 = 1.3;
const TOP_P: f64 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 8192;

fn default_generation_config() -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        temperature: Some(TEMPERATURE),
        top_p: Some(TOP_P),
        top_k: Some(TOP_K),
        max_output_tokens: Some(MAX_OUTPUT_TOKENS),
    }
}

/// Synthesize the outbound conversation: the instruction exchange first, then
/// the history verbatim, then the current turn last.
///
/// The system instruction rides in a leading user/model pair rather than the
/// `systemInstruction` request field, so history-capable models keep honoring
/// it across long conversations.
fn build_contents(
    message: &str,
    images: &[ImageAttachment],
    history: &[HistoryEntry],
    system_instruction: &str,
) -> Result<Vec<GeminiContent>, DispatchError> {
    let mut current_parts: Vec<GeminiPart> = Vec::new();
    if !message.is_empty() {
        current_parts.push(GeminiPart::text(message));
    }
    for image in images {
        current_parts.push(GeminiPart::inline_data(&image.mime_type, &image.data));
    }
    if current_parts.is_empty() {
        return Err(DispatchError::EmptyMessage);
    }

    let mut contents = Vec::with_capacity(history.len() + 3);
    contents.push(GeminiContent {
        role: Some(ChatRole::User.as_str().to_string()),
        parts: vec![GeminiPart::text(INIT_PROMPT)],
    });
    contents.push(GeminiContent {
        role: Some(ChatRole::Model.as_str().to_string()),
        parts: vec![GeminiPart::text(system_instruction)],
    });
    for entry in history {
        contents.push(GeminiContent {
            role: Some(entry.role.as_str().to_string()),
            parts: entry.parts.iter().map(|p| GeminiPart::text(&p.text)).collect(),
        });
    }
    contents.push(GeminiContent {
        role: Some(ChatRole::User.as_str().to_string()),
        parts: current_parts,
    });
    Ok(contents)
}

/// Send one chat message and return the generated text.
///
/// The payload is built once; delivery walks `config.api_keys` in order,
/// advancing to the next key only when the failure is classified as
/// retryable (quota, permission, malformed-key). Anything else propagates
/// immediately. An empty completion is surfaced as [`DispatchError::EmptyResponse`]
/// without rotating keys.
pub async fn dispatch(
    client: &GeminiClient,
    message: &str,
    images: &[ImageAttachment],
    history: &[HistoryEntry],
    config: &DispatchConfig,
) -> Result<String, DispatchError> {
    let contents = build_contents(message, images, history, &config.system_instruction)?;
    let request = GeminiRequest {
        contents,
        generation_config: Some(default_generation_config()),
    };

    for (index, api_key) in config.api_keys.iter().enumerate() {
        match client.generate_content(&request, api_key).await {
            Ok(text) => return Ok(text),
            Err(err) => {
                warn!("API key at index {} failed: {}", index, err);
                if err.is_retryable() {
                    continue;
                }
                return Err(err);
            }
        }
    }
    Err(DispatchError::KeysExhausted)
}
