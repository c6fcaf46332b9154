use clap::Args;

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Access passphrase. Compared in memory against a build-time constant.
    pub passphrase: String,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Tax identifier; quotes, spaces and hyphens are stripped before matching.
    #[arg(allow_hyphen_values = true)]
    pub query: String,
}

#[derive(Debug, Args)]
pub struct InsightArgs {
    /// Tax identifier of the record to analyze.
    #[arg(allow_hyphen_values = true)]
    pub query: String,
}
