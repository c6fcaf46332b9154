use super::env::read_env_u64;

const ENV_SEARCH_DELAY_MS: &str = "TAXSCOPE_SEARCH_DELAY_MS";

/// Minimum-latency floor before a search outcome is published. The scan
/// itself is a synchronous in-memory pass; the floor keeps result
/// publication ordered behind the generation check.
const DEFAULT_SEARCH_DELAY_MS: u64 = 400;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub delay_ms: u64,
}

impl SearchConfig {
    pub(super) fn from_env() -> Self {
        Self {
            delay_ms: read_env_u64(ENV_SEARCH_DELAY_MS).unwrap_or(DEFAULT_SEARCH_DELAY_MS),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_SEARCH_DELAY_MS,
        }
    }
}
