use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use taxscope_core::TaxScope;
use taxscope_core::models::SearchOutcome;

use crate::cli::Commands;

pub(crate) fn run_from_root(root: &Path, command: Commands) -> Result<()> {
    let app = TaxScope::new(root).context("failed to create app")?;
    app.initialize().context("failed to initialize root")?;

    match command {
        Commands::Login(args) => {
            let status = app.login(&args.passphrase)?;
            print_json(&status)?;
            if !status.authenticated {
                anyhow::bail!("passphrase rejected");
            }
        }
        Commands::Logout => {
            let status = app.logout()?;
            print_json(&status)?;
        }
        Commands::Status => {
            let status = app.runtime_status()?;
            print_json(&status)?;
        }
        Commands::Load => {
            let summary = app.load_dataset()?;
            print_json(&summary)?;
        }
        Commands::Lookup(args) => {
            let outcome = app.lookup(&args.query)?;
            print_json(&outcome)?;
            if matches!(outcome, SearchOutcome::NotFound { .. }) {
                anyhow::bail!("no record found");
            }
        }
        Commands::Insight(args) => {
            let result = app.insight(&args.query)?;
            print_json(&result)?;
        }
        Commands::Stats => {
            let stats = app.stats()?;
            print_json(&stats)?;
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
