use serde::{Deserialize, Serialize};

/// One row of the published dataset, after column coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRecord {
    pub authority_code: String,
    pub tax_id: String,
    pub name: String,
    pub invoice_count: u64,
    pub tax_amount: f64,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    Error,
    None,
}

/// Transient outcome banner. Overwritten by the next operation, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl Default for AppMessage {
    fn default() -> Self {
        Self::none()
    }
}

impl AppMessage {
    #[must_use]
    pub fn none() -> Self {
        Self {
            kind: MessageKind::None,
            text: String::new(),
        }
    }

    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// Which suspending operation currently owns the runtime. Mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadingState {
    #[default]
    Idle,
    FetchingData,
    Searching,
    AiAnalyzing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSummary {
    pub record_count: usize,
    pub skipped_short_rows: usize,
    pub skipped_short_ids: usize,
    pub replaced_previous: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_records: usize,
    pub total_invoices: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found {
        query: String,
        record: TaxRecord,
    },
    NotFound {
        query: String,
    },
    /// Blank input after trimming. No search ran and no state changed.
    EmptyQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    pub login_error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightResult {
    pub tax_id: String,
    pub commentary: String,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub request_id: String,
    pub operation: String,
    pub status: String,
    pub latency_ms: u128,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Persisted session document. The only durable artifact of the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFlag {
    pub authenticated: bool,
    pub created_at: String,
}
