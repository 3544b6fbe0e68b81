use crate::gemini::{GeminiContent, GeminiGenerationConfig};
use serde::{Deserialize, Serialize};

/// Body of a `models/{model}:generateContent` call. The model itself is part
/// of the request path, not the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}
