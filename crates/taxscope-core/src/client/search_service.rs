use std::time::{Duration, Instant};

use crate::error::Result;
use crate::models::SearchOutcome;
use crate::record::normalize_tax_id;

use super::TaxScope;

impl TaxScope {
    /// Exact-match lookup by normalized identifier.
    ///
    /// Blank input after trimming is a no-op: nothing is searched and no
    /// state changes. Otherwise the query goes through the same
    /// normalization rule the loader applied, a linear scan takes the first
    /// equal id, and the outcome is published only if no newer search was
    /// issued meanwhile.
    pub fn lookup(&self, raw_query: &str) -> Result<SearchOutcome> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let output = (|| -> Result<SearchOutcome> {
            self.require_authenticated("lookup")?;

            let trimmed = raw_query.trim();
            if trimmed.is_empty() {
                return Ok(SearchOutcome::EmptyQuery);
            }

            self.ensure_dataset()?;

            let generation = self.write_state(|state| state.search_started())?;
            let key = normalize_tax_id(trimmed);
            let hit = self.read_state(|state| state.find_by_tax_id(&key))?;

            let outcome = match hit {
                Some(record) => SearchOutcome::Found {
                    query: raw_query.to_string(),
                    record,
                },
                None => SearchOutcome::NotFound {
                    query: raw_query.to_string(),
                },
            };

            apply_latency_floor(self.config.search.delay_ms);
            let applied = self.write_state(|state| state.search_resolved(generation, &outcome))?;
            if !applied {
                self.log_ambient_warning(
                    "search.lookup",
                    "search outcome superseded by a newer generation",
                );
            }
            Ok(outcome)
        })();

        match output {
            Ok(outcome) => {
                let (status, target) = match &outcome {
                    SearchOutcome::Found { record, .. } => ("ok", Some(record.tax_id.clone())),
                    SearchOutcome::NotFound { query } => {
                        ("not_found", Some(normalize_tax_id(query)))
                    }
                    SearchOutcome::EmptyQuery => ("noop", None),
                };
                self.log_request_status(request_id, "search.lookup", status, started, target, None);
                Ok(outcome)
            }
            Err(err) => {
                self.log_request_error(request_id, "search.lookup", started, None, &err, None);
                Err(err)
            }
        }
    }
}

fn apply_latency_floor(delay_ms: u64) {
    if delay_ms > 0 {
        std::thread::sleep(Duration::from_millis(delay_ms));
    }
}
