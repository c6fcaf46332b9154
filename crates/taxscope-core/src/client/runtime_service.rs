use serde::Serialize;

use crate::error::Result;
use crate::models::{AppMessage, LoadingState, TaxRecord};

use super::TaxScope;

/// Read-only snapshot of the runtime state for status surfaces.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeStatus {
    pub authenticated: bool,
    pub login_error: bool,
    pub dataset_loaded: bool,
    pub loading: LoadingState,
    pub message: AppMessage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_result: Option<TaxRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

impl TaxScope {
    pub fn runtime_status(&self) -> Result<RuntimeStatus> {
        self.read_state(|state| RuntimeStatus {
            authenticated: state.authenticated(),
            login_error: state.login_error(),
            dataset_loaded: state.dataset_loaded(),
            loading: state.loading(),
            message: state.message().clone(),
            search_result: state.search_result().cloned(),
            insight: state.insight().map(ToString::to_string),
        })
    }
}
