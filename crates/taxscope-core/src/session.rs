use chrono::Utc;

use crate::error::Result;
use crate::fs::{LocalStateFs, Scope};
use crate::models::SessionFlag;

/// Build-time gate string. Compared with plain equality and shipped inside
/// the binary: a UX deterrent, not an access-control boundary.
pub const SESSION_PASSPHRASE: &str = "abc@2025";

const SESSION_FLAG_FILE: &str = "auth_flag.json";

/// Persists the single authenticated flag under the root's `session/`
/// directory, the runtime analog of the original tab-scoped storage key.
#[derive(Debug, Clone)]
pub struct SessionStore {
    fs: LocalStateFs,
}

impl SessionStore {
    #[must_use]
    pub fn new(fs: LocalStateFs) -> Self {
        Self { fs }
    }

    /// The restored flag, or `None` when absent or unreadable. A corrupt
    /// flag file degrades to "not authenticated" instead of failing startup.
    #[must_use]
    pub fn restore(&self) -> Option<SessionFlag> {
        let raw = self.fs.read(Scope::Session, SESSION_FLAG_FILE).ok()?;
        serde_json::from_str::<SessionFlag>(&raw)
            .ok()
            .filter(|flag| flag.authenticated)
    }

    pub fn persist(&self) -> Result<SessionFlag> {
        let flag = SessionFlag {
            authenticated: true,
            created_at: Utc::now().to_rfc3339(),
        };
        self.fs.write(
            Scope::Session,
            SESSION_FLAG_FILE,
            &serde_json::to_string(&flag)?,
        )?;
        Ok(flag)
    }

    pub fn clear(&self) -> Result<()> {
        self.fs.remove(Scope::Session, SESSION_FLAG_FILE)
    }
}
