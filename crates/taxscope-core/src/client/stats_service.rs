use std::time::Instant;

use crate::error::Result;
use crate::models::DatasetStats;
use crate::state::AppState;

use super::TaxScope;

impl TaxScope {
    /// Record count plus the invoice total across the whole dataset.
    pub fn stats(&self) -> Result<DatasetStats> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let output = (|| -> Result<DatasetStats> {
            self.require_authenticated("stats")?;
            self.ensure_dataset()?;
            self.read_state(AppState::stats)
        })();

        match output {
            Ok(stats) => {
                self.log_request_status(
                    request_id,
                    "dataset.stats",
                    "ok",
                    started,
                    None,
                    Some(serde_json::json!({
                        "total_records": stats.total_records,
                        "total_invoices": stats.total_invoices,
                    })),
                );
                Ok(stats)
            }
            Err(err) => {
                self.log_request_error(request_id, "dataset.stats", started, None, &err, None);
                Err(err)
            }
        }
    }
}
