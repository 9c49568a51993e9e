// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging and parse command-line arguments
// 2. Validate the configuration (token, targets, workers)
// 3. Run the audit: GitHub -> README links -> worker pool -> report
// 4. Print the report and exit with a proper code
//    (0 = no broken links, 1 = broken links, 2 = fatal error)
// =============================================================================

mod audit;         // src/audit/ - worker pool, aggregator, orchestrator
mod checker;       // src/checker/ - link extraction, normalization, probing
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - validated run configuration
mod error;         // src/error.rs - error types
mod github;        // src/github/ - GitHub API access
mod logging;       // src/logging.rs - tracing setup

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use audit::Report;
use checker::HttpProbe;
use cli::Cli;
use config::AuditConfig;
use error::AuditError;
use github::GitHubClient;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if e
                .downcast_ref::<AuditError>()
                .is_some_and(AuditError::is_configuration)
            {
                eprintln!("Run `readme-auditor --help` for usage.");
            }
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found
//   Err   = configuration or discovery error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = AuditConfig::from_cli(cli)?;

    let source = GitHubClient::new(&config.token, &config.api_url)?;
    let probe = Arc::new(HttpProbe::new(config.probe)?);

    let report = audit::run_audit(&config, &source, probe).await?;
    tracing::info!(
        checked = report.checked,
        broken = report.failure_count(),
        "audit finished"
    );

    print_report(&report, config.json)?;

    if report.is_clean() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_report(report: &Report, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!();
        println!("{}", report.render_text());
    }
    Ok(())
}
