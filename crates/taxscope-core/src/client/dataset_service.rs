use std::time::Instant;

use crate::dataset::{DatasetFetcher, parse_dataset};
use crate::error::Result;
use crate::models::LoadSummary;
use crate::state::AppState;

use super::TaxScope;

const LOAD_FAILURE_TEXT: &str = "failed to reach the dataset endpoint";

impl TaxScope {
    /// Fetch and parse the published export, replacing the in-memory
    /// dataset wholesale. On transport failure the previous dataset stays
    /// intact and an error message is published; a retry is always safe.
    pub fn load_dataset(&self) -> Result<LoadSummary> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();
        let url = self.config.dataset.url.clone();

        let output = (|| -> Result<LoadSummary> {
            self.require_authenticated("load")?;
            self.write_state(AppState::load_started)?;

            let fetcher = DatasetFetcher::new(self.config.dataset.clone())?;
            let text = match fetcher.fetch_csv() {
                Ok(text) => text,
                Err(err) => {
                    self.write_state(|state| state.load_failed(LOAD_FAILURE_TEXT))?;
                    return Err(err);
                }
            };

            let parsed = parse_dataset(&text);
            let summary = LoadSummary {
                record_count: parsed.records.len(),
                skipped_short_rows: parsed.skipped_short_rows,
                skipped_short_ids: parsed.skipped_short_ids,
                replaced_previous: self.read_state(AppState::dataset_loaded)?,
            };
            self.write_state(|state| state.load_succeeded(parsed.records))?;
            Ok(summary)
        })();

        match output {
            Ok(summary) => {
                self.log_request_status(
                    request_id,
                    "dataset.load",
                    "ok",
                    started,
                    Some(url),
                    Some(serde_json::json!({
                        "record_count": summary.record_count,
                        "skipped_short_rows": summary.skipped_short_rows,
                        "skipped_short_ids": summary.skipped_short_ids,
                        "replaced_previous": summary.replaced_previous,
                    })),
                );
                Ok(summary)
            }
            Err(err) => {
                self.log_request_error(request_id, "dataset.load", started, Some(url), &err, None);
                Err(err)
            }
        }
    }

    /// The dataset is polled once per process; later operations reuse it.
    pub(super) fn ensure_dataset(&self) -> Result<()> {
        if self.read_state(AppState::dataset_loaded)? {
            return Ok(());
        }
        self.load_dataset()?;
        Ok(())
    }
}
