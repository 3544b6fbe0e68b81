use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Caller-supplied dispatch configuration.
///
/// `api_keys` order defines retry precedence: index 0 is tried first and the
/// dispatcher advances down the list on retryable failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    pub api_keys: Vec<String>,
    pub system_instruction: String,
}

impl DispatchConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: DispatchConfig =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
