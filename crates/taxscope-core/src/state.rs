use crate::models::{AppMessage, DatasetStats, LoadingState, SearchOutcome, TaxRecord};

/// Whole-app state, owned by the facade and mutated only through the named
/// transitions below. There is no ambient shared state anywhere else.
#[derive(Debug, Default)]
pub struct AppState {
    authenticated: bool,
    login_error: bool,
    dataset: Vec<TaxRecord>,
    dataset_loaded: bool,
    loading: LoadingState,
    message: AppMessage,
    search_result: Option<TaxRecord>,
    insight: Option<String>,
    search_generation: u64,
}

impl AppState {
    #[must_use]
    pub fn authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub fn login_error(&self) -> bool {
        self.login_error
    }

    #[must_use]
    pub fn dataset_loaded(&self) -> bool {
        self.dataset_loaded
    }

    #[must_use]
    pub fn loading(&self) -> LoadingState {
        self.loading
    }

    #[must_use]
    pub fn message(&self) -> &AppMessage {
        &self.message
    }

    #[must_use]
    pub fn search_result(&self) -> Option<&TaxRecord> {
        self.search_result.as_ref()
    }

    #[must_use]
    pub fn insight(&self) -> Option<&str> {
        self.insight.as_deref()
    }

    #[must_use]
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            total_records: self.dataset.len(),
            total_invoices: self
                .dataset
                .iter()
                .map(|record| record.invoice_count)
                .sum(),
        }
    }

    /// First record whose normalized identifier equals `key`. Duplicate ids
    /// resolve to scan order: first wins.
    #[must_use]
    pub fn find_by_tax_id(&self, key: &str) -> Option<TaxRecord> {
        self.dataset
            .iter()
            .find(|record| record.tax_id == key)
            .cloned()
    }

    // --- session gate ---

    pub fn auth_succeeded(&mut self) {
        self.authenticated = true;
        self.login_error = false;
    }

    pub fn auth_failed(&mut self) {
        self.login_error = true;
    }

    pub fn auth_restored(&mut self) {
        self.authenticated = true;
    }

    pub fn logged_out(&mut self) {
        self.authenticated = false;
        self.login_error = false;
        self.search_result = None;
        self.insight = None;
        self.message = AppMessage::none();
    }

    // --- dataset ---

    pub fn load_started(&mut self) {
        self.loading = LoadingState::FetchingData;
    }

    /// Wholesale replacement: a reload never merges with or duplicates a
    /// previous generation of records.
    pub fn load_succeeded(&mut self, records: Vec<TaxRecord>) {
        self.dataset = records;
        self.dataset_loaded = true;
        self.loading = LoadingState::Idle;
    }

    /// The previous dataset, if any, stays intact.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.message = AppMessage::error(message);
        self.loading = LoadingState::Idle;
    }

    // --- search ---

    /// Issue a search generation ticket. Clears the previous result, insight
    /// and message up front, like the original flow.
    pub fn search_started(&mut self) -> u64 {
        self.search_generation += 1;
        self.loading = LoadingState::Searching;
        self.search_result = None;
        self.insight = None;
        self.message = AppMessage::none();
        self.search_generation
    }

    /// Publish a search outcome. A stale generation (a newer search was
    /// issued meanwhile) is discarded: only the most recent search wins.
    /// Returns whether the outcome was applied.
    pub fn search_resolved(&mut self, generation: u64, outcome: &SearchOutcome) -> bool {
        if generation != self.search_generation {
            return false;
        }
        match outcome {
            SearchOutcome::Found { query, record } => {
                self.search_result = Some(record.clone());
                self.message =
                    AppMessage::success(format!("found record for tax id: {query}"));
            }
            SearchOutcome::NotFound { query } => {
                self.message = AppMessage::error(format!("no record found for tax id: {query}"));
            }
            SearchOutcome::EmptyQuery => {}
        }
        self.loading = LoadingState::Idle;
        true
    }

    // --- insight ---

    pub fn insight_started(&mut self) {
        self.loading = LoadingState::AiAnalyzing;
    }

    pub fn insight_resolved(&mut self, commentary: impl Into<String>) {
        self.insight = Some(commentary.into());
        self.loading = LoadingState::Idle;
    }

    pub fn insight_aborted(&mut self) {
        self.loading = LoadingState::Idle;
    }
}
