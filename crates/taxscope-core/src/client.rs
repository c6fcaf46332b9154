use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use crate::config::AppConfig;
use crate::error::Result;
use crate::fs::LocalStateFs;
use crate::session::SessionStore;
use crate::state::AppState;

mod dataset_service;
mod insight_service;
mod request_log_service;
mod runtime_service;
mod search_service;
mod session_service;
mod stats_service;

pub use runtime_service::RuntimeStatus;

/// Facade over the lookup runtime. All state mutation goes through the
/// service methods on this type; the CLI and tests never touch `AppState`
/// directly.
#[derive(Clone)]
pub struct TaxScope {
    pub fs: LocalStateFs,
    pub(crate) config: AppConfig,
    session: SessionStore,
    state: Arc<RwLock<AppState>>,
}

impl std::fmt::Debug for TaxScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxScope").finish_non_exhaustive()
    }
}

impl TaxScope {
    pub fn new(root_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(root_dir, AppConfig::from_env())
    }

    pub fn with_config(root_dir: impl Into<PathBuf>, config: AppConfig) -> Result<Self> {
        let root = root_dir.into();
        fs::create_dir_all(&root)?;
        let fs = LocalStateFs::new(&root);
        let session = SessionStore::new(fs.clone());

        Ok(Self {
            fs,
            config,
            session,
            state: Arc::new(RwLock::new(AppState::default())),
        })
    }

    /// Prepare the root layout, restore the persisted session flag, and
    /// report a missing insight credential once per startup.
    pub fn initialize(&self) -> Result<()> {
        self.fs.initialize()?;
        if self.session.restore().is_some() {
            self.write_state(AppState::auth_restored)?;
        }
        if self.config.insight.api_key.is_none() {
            self.log_ambient_warning(
                "insight.credential_check",
                "TAXSCOPE_API_KEY is not configured; insight requests will be refused",
            );
        }
        Ok(())
    }

    pub(crate) fn read_state<T>(&self, read: impl FnOnce(&AppState) -> T) -> Result<T> {
        let state = self
            .state
            .read()
            .map_err(|_| crate::error::TaxScopeError::lock_poisoned("state"))?;
        Ok(read(&state))
    }

    pub(crate) fn write_state<T>(&self, write: impl FnOnce(&mut AppState) -> T) -> Result<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| crate::error::TaxScopeError::lock_poisoned("state"))?;
        Ok(write(&mut state))
    }
}

#[cfg(test)]
mod tests;
