// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Example:
//   GH_SECRET=... readme-auditor --workers 20 rust-lang serde-rs/serde
// =============================================================================

use clap::Parser;

use crate::checker::DEFAULT_LINK_HOST;
use crate::github::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "readme-auditor",
    version,
    about = "Checks every link in the READMEs of GitHub repositories and organizations",
    long_about = "readme-auditor fetches the README of each repository you name (or of every \
                  repository in an organization), extracts its links and checks that each one \
                  still resolves. Broken links are listed at the end."
)]
pub struct Cli {
    /// Repositories (owner/name) or organizations to audit
    ///
    /// Anything containing a '/' is a repository, everything else is
    /// treated as an organization and expanded to all of its repositories.
    pub targets: Vec<String>,

    /// Number of links checked concurrently
    #[arg(long, default_value_t = 10)]
    pub workers: usize,

    /// GitHub token used for the API
    #[arg(long, env = "GH_SECRET", hide_env_values = true)]
    pub token: Option<String>,

    /// Timeout for each link check, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Timeout for the GET retry after a 405 response, in seconds
    #[arg(long, default_value_t = 5)]
    pub fallback_timeout_secs: u64,

    /// How many times a rate-limited (429) link is retried before it counts as broken
    #[arg(long, default_value_t = 5)]
    pub max_rate_limit_retries: u32,

    /// Upper bound of the random wait before retrying a rate-limited link, in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_limit_backoff_secs: u64,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Host that relative README links are resolved against
    #[arg(long, default_value = DEFAULT_LINK_HOST)]
    pub link_host: String,

    /// Output the final report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}
