use std::time::Instant;

use crate::error::{Result, TaxScopeError};
use crate::insight::{GENERIC_FAILURE_TEXT, InsightClient};
use crate::models::InsightResult;
use crate::record::normalize_tax_id;
use crate::state::AppState;

use super::TaxScope;

impl TaxScope {
    /// Ask the text-generation endpoint for commentary about one record.
    ///
    /// A missing credential is a configuration error and never reaches the
    /// network. Once a request is in flight, any transport or model failure
    /// collapses into the fixed generic commentary text; the underlying
    /// error is only visible in the request log.
    pub fn insight(&self, raw_query: &str) -> Result<InsightResult> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let output = (|| -> Result<InsightResult> {
            self.require_authenticated("insight")?;

            let client = InsightClient::new(self.config.insight.clone())?;

            let key = normalize_tax_id(raw_query.trim());
            if key.is_empty() {
                return Err(TaxScopeError::Validation(
                    "insight requires a tax id".to_string(),
                ));
            }

            self.ensure_dataset()?;
            let record = self
                .read_state(|state| state.find_by_tax_id(&key))?
                .ok_or_else(|| {
                    TaxScopeError::NotFound(format!("no record found for tax id: {raw_query}"))
                })?;

            self.write_state(AppState::insight_started)?;
            let commentary = match client.commentary(&record) {
                Ok(text) => text,
                Err(err) => {
                    self.log_request_error(
                        uuid::Uuid::new_v4().to_string(),
                        "insight.request",
                        started,
                        Some(record.tax_id.clone()),
                        &err,
                        None,
                    );
                    GENERIC_FAILURE_TEXT.to_string()
                }
            };
            self.write_state(|state| state.insight_resolved(&commentary))?;

            Ok(InsightResult {
                tax_id: record.tax_id,
                commentary,
                model: client.model().to_string(),
            })
        })();

        match output {
            Ok(result) => {
                self.log_request_status(
                    request_id,
                    "insight.generate",
                    if result.commentary == GENERIC_FAILURE_TEXT {
                        "degraded"
                    } else {
                        "ok"
                    },
                    started,
                    Some(result.tax_id.clone()),
                    Some(serde_json::json!({ "model": result.model })),
                );
                Ok(result)
            }
            Err(err) => {
                self.write_state(AppState::insight_aborted).ok();
                self.log_request_error(request_id, "insight.generate", started, None, &err, None);
                Err(err)
            }
        }
    }
}
