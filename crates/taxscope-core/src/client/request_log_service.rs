use std::time::Instant;

use chrono::Utc;

use crate::error::TaxScopeError;
use crate::fs::Scope;
use crate::models::RequestLogEntry;

use super::TaxScope;

const REQUEST_LOG_FILE: &str = "requests.jsonl";

impl TaxScope {
    /// Append one entry to `logs/requests.jsonl`. Logging never fails an
    /// operation; write errors are swallowed.
    pub(super) fn try_log_request(&self, entry: &RequestLogEntry) {
        if let Ok(serialized) = serde_json::to_string(entry) {
            let mut line = serialized;
            line.push('\n');
            let _ = self.fs.append(Scope::Logs, REQUEST_LOG_FILE, &line);
        }
    }

    pub(super) fn log_request_status(
        &self,
        request_id: String,
        operation: &str,
        status: &str,
        started: Instant,
        target: Option<String>,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: status.to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: None,
            error_message: None,
            details,
        });
    }

    pub(super) fn log_request_error(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        target: Option<String>,
        err: &TaxScopeError,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "error".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: Some(err.code().to_string()),
            error_message: Some(err.to_string()),
            details,
        });
    }

    pub(super) fn log_request_warning(
        &self,
        request_id: String,
        operation: &str,
        started: Instant,
        target: Option<String>,
        warning_message: &str,
        details: Option<serde_json::Value>,
    ) {
        self.try_log_request(&RequestLogEntry {
            request_id,
            operation: operation.to_string(),
            status: "warning".to_string(),
            latency_ms: started.elapsed().as_millis(),
            created_at: Utc::now().to_rfc3339(),
            target,
            error_code: None,
            error_message: Some(warning_message.to_string()),
            details,
        });
    }

    pub(super) fn log_ambient_warning(&self, operation: &str, warning_message: &str) {
        self.log_request_warning(
            uuid::Uuid::new_v4().to_string(),
            operation,
            Instant::now(),
            None,
            warning_message,
            None,
        );
    }
}
