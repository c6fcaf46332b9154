use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::DatasetConfig;
use crate::error::{Result, TaxScopeError};
use crate::models::TaxRecord;
use crate::parse::split_csv_row;
use crate::record::{RowSkip, record_from_columns};

/// Outcome of one full parse of the fetched document.
#[derive(Debug, Clone)]
pub struct ParsedDataset {
    pub records: Vec<TaxRecord>,
    pub skipped_short_rows: usize,
    pub skipped_short_ids: usize,
}

/// Blocking fetcher for the published CSV export.
#[derive(Clone)]
pub struct DatasetFetcher {
    config: DatasetConfig,
    http: Client,
}

impl std::fmt::Debug for DatasetFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetFetcher")
            .field("url", &self.config.url)
            .finish_non_exhaustive()
    }
}

impl DatasetFetcher {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { config, http })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn fetch_csv(&self) -> Result<String> {
        let resp = self.http.get(&self.config.url).send()?;
        if !resp.status().is_success() {
            return Err(TaxScopeError::Transport(format!(
                "dataset fetch failed with status {}",
                resp.status()
            )));
        }
        Ok(resp.text()?)
    }
}

/// Parse the whole document: line 0 is the header and is always skipped
/// without validation, every following line goes through the row splitter
/// and the normalizer. Rows that fail validation are dropped, counted, and
/// never surfaced as errors.
///
/// Quoted fields with embedded newlines are not supported; splitting
/// happens on raw lines before quote-aware field parsing.
#[must_use]
pub fn parse_dataset(text: &str) -> ParsedDataset {
    let mut records = Vec::new();
    let mut skipped_short_rows = 0usize;
    let mut skipped_short_ids = 0usize;

    for line in text.lines().skip(1) {
        let columns = split_csv_row(line);
        match record_from_columns(&columns) {
            Ok(record) => records.push(record),
            Err(RowSkip::TooFewColumns) => skipped_short_rows += 1,
            Err(RowSkip::ShortTaxId) => skipped_short_ids += 1,
        }
    }

    ParsedDataset {
        records,
        skipped_short_rows,
        skipped_short_ids,
    }
}
