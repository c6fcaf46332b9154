mod dataset;
mod env;
mod insight;
mod search;

pub use dataset::DatasetConfig;
pub use insight::InsightConfig;
pub use search::SearchConfig;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub insight: InsightConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            dataset: DatasetConfig::from_env(),
            insight: InsightConfig::from_env(),
            search: SearchConfig::from_env(),
        }
    }
}
