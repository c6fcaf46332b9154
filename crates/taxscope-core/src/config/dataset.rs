use super::env::{read_env_u64, read_non_empty_env};

const ENV_DATA_URL: &str = "TAXSCOPE_DATA_URL";
const ENV_DATA_TIMEOUT_MS: &str = "TAXSCOPE_DATA_TIMEOUT_MS";

/// Published CSV export of the invoice sheet. Unauthenticated endpoint;
/// polled once per process.
const DEFAULT_DATA_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQAstBXE5hbO14W9dWz-wDU1h4tve42LjLNq1uN3WjpHDgst5J_F4VO8enZS3q5e2YOM9hRNBkuCt0a/pub?output=csv";
const DEFAULT_DATA_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub url: String,
    pub timeout_ms: u64,
}

impl DatasetConfig {
    pub(super) fn from_env() -> Self {
        Self {
            url: read_non_empty_env(ENV_DATA_URL).unwrap_or_else(|| DEFAULT_DATA_URL.to_string()),
            timeout_ms: read_env_u64(ENV_DATA_TIMEOUT_MS).unwrap_or(DEFAULT_DATA_TIMEOUT_MS),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATA_URL.to_string(),
            timeout_ms: DEFAULT_DATA_TIMEOUT_MS,
        }
    }
}
