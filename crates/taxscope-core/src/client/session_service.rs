use std::time::Instant;

use crate::error::{Result, TaxScopeError};
use crate::models::AuthStatus;
use crate::session::SESSION_PASSPHRASE;
use crate::state::AppState;

use super::TaxScope;

impl TaxScope {
    /// Compare the candidate against the build-time passphrase. A match
    /// persists the session flag; a mismatch raises the transient login
    /// error and discards the candidate. The candidate itself is never
    /// written to the request log.
    pub fn login(&self, candidate: &str) -> Result<AuthStatus> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let output = (|| -> Result<AuthStatus> {
            if candidate == SESSION_PASSPHRASE {
                self.session.persist()?;
                self.write_state(AppState::auth_succeeded)?;
            } else {
                self.write_state(AppState::auth_failed)?;
            }
            self.auth_status()
        })();

        match output {
            Ok(status) => {
                self.log_request_status(
                    request_id,
                    "session.login",
                    if status.authenticated { "ok" } else { "rejected" },
                    started,
                    None,
                    Some(serde_json::json!({ "authenticated": status.authenticated })),
                );
                Ok(status)
            }
            Err(err) => {
                self.log_request_error(request_id, "session.login", started, None, &err, None);
                Err(err)
            }
        }
    }

    pub fn logout(&self) -> Result<AuthStatus> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let started = Instant::now();

        let output = (|| -> Result<AuthStatus> {
            self.session.clear()?;
            self.write_state(AppState::logged_out)?;
            self.auth_status()
        })();

        match output {
            Ok(status) => {
                self.log_request_status(request_id, "session.logout", "ok", started, None, None);
                Ok(status)
            }
            Err(err) => {
                self.log_request_error(request_id, "session.logout", started, None, &err, None);
                Err(err)
            }
        }
    }

    pub fn auth_status(&self) -> Result<AuthStatus> {
        self.read_state(|state| AuthStatus {
            authenticated: state.authenticated(),
            login_error: state.login_error(),
        })
    }

    pub(super) fn require_authenticated(&self, operation: &str) -> Result<()> {
        if self.read_state(AppState::authenticated)? {
            return Ok(());
        }
        Err(TaxScopeError::Unauthenticated(format!(
            "login is required before {operation}"
        )))
    }
}
