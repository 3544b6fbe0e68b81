use crate::gemini::{GeminiCandidate, GeminiPart, GeminiPromptFeedback, GeminiUsage};
use serde::{Deserialize, Serialize};

/// A `generateContent` response. Blocked prompts may carry `promptFeedback`
/// and no candidates at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "modelVersion")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(rename = "promptFeedback")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(rename = "responseId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, skipping thinking parts.
    /// `None` when there is no candidate or no visible text.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| match part {
                GeminiPart::Text { text, thought } if !thought.unwrap_or(false) => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiFinishReason;
    use serde_json::json;

    #[test]
    fn test_text_skips_thought_parts() {
        let response_json = json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "Considering the question...", "thought": true },
                            { "text": "The answer is 42." }
                        ]
                    },
                    "finishReason": "STOP",
                    "index": 0
                }
            ],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 7,
                "totalTokenCount": 19
            },
            "modelVersion": "gemini-2.0-flash-exp",
            "responseId": "abc123"
        });

        let response: GeminiResponse = serde_json::from_value(response_json).unwrap();
        assert_eq!(response.text().as_deref(), Some("The answer is 42."));
        assert!(matches!(
            response.candidates[0].finish_reason,
            Some(GeminiFinishReason::Stop)
        ));
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.total_token_count, Some(19));
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        let response_json = json!({
            "promptFeedback": {
                "blockReason": "SAFETY",
                "safetyRatings": [
                    {
                        "category": "HARM_CATEGORY_DANGEROUS_CONTENT",
                        "probability": "HIGH",
                        "blocked": true
                    }
                ]
            }
        });

        let response: GeminiResponse = serde_json::from_value(response_json).unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.text().is_none());
        assert!(response.prompt_feedback.is_some());
    }

    #[test]
    fn test_empty_parts_yield_no_text() {
        let response_json = json!({
            "candidates": [
                { "content": { "role": "model", "parts": [] } }
            ]
        });

        let response: GeminiResponse = serde_json::from_value(response_json).unwrap();
        assert!(response.text().is_none());
    }
}
