use super::env::{read_env_u64, read_non_empty_env};

const ENV_API_KEY: &str = "TAXSCOPE_API_KEY";
const ENV_INSIGHT_ENDPOINT: &str = "TAXSCOPE_INSIGHT_ENDPOINT";
const ENV_INSIGHT_MODEL: &str = "TAXSCOPE_INSIGHT_MODEL";
const ENV_INSIGHT_TIMEOUT_MS: &str = "TAXSCOPE_INSIGHT_TIMEOUT_MS";

const DEFAULT_INSIGHT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_INSIGHT_TIMEOUT_MS: u64 = 20_000;

#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: String,
    pub timeout_ms: u64,
}

impl InsightConfig {
    pub(super) fn from_env() -> Self {
        Self {
            api_key: read_non_empty_env(ENV_API_KEY),
            endpoint: read_non_empty_env(ENV_INSIGHT_ENDPOINT),
            model: read_non_empty_env(ENV_INSIGHT_MODEL)
                .unwrap_or_else(|| DEFAULT_INSIGHT_MODEL.to_string()),
            timeout_ms: read_env_u64(ENV_INSIGHT_TIMEOUT_MS).unwrap_or(DEFAULT_INSIGHT_TIMEOUT_MS),
        }
    }

    /// Explicit endpoint override, or the generation endpoint derived from
    /// the model name.
    #[must_use]
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                self.model
            )
        })
    }
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            model: DEFAULT_INSIGHT_MODEL.to_string(),
            timeout_ms: DEFAULT_INSIGHT_TIMEOUT_MS,
        }
    }
}
