use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;


pub use args::{InsightArgs, LoginArgs, LookupArgs};

#[derive(Debug, Parser)]
#[command(name = "taxscope")]
#[command(about = "Passphrase-gated tax-record lookup", version)]
pub struct Cli {
    #[arg(long, default_value = ".taxscope")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Unlock the session with the access passphrase.
    Login(LoginArgs),
    /// Clear the persisted session flag.
    Logout,
    /// Show the current session and runtime state.
    Status,
    /// Fetch the published dataset and report the load summary.
    Load,
    /// Look up one record by tax identifier.
    Lookup(LookupArgs),
    /// Ask the AI endpoint for commentary about one record.
    Insight(InsightArgs),
    /// Dataset-wide record and invoice totals.
    Stats,
}
