// Public fallible APIs in this crate share one concrete error contract
// (`TaxScopeError`). Repeating per-function `# Errors` boilerplate obscures
// behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod client;
pub mod config;
pub mod dataset;
pub mod error;
pub mod fs;
pub mod insight;
pub mod models;
pub mod parse;
pub mod record;
pub mod session;
pub mod state;

pub use client::{RuntimeStatus, TaxScope};
pub use error::{Result, TaxScopeError};
