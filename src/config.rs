// src/config.rs
// =============================================================================
// Turns the parsed command line into a validated AuditConfig.
//
// Everything here fails fast, before a single request goes out:
// - no GH_SECRET token
// - no targets
// - zero workers
// - a repository target without an owner or a name
// =============================================================================

use std::time::Duration;

use crate::checker::{ProbeSettings, RateLimitPolicy};
use crate::cli::Cli;
use crate::error::AuditError;
use crate::github::Target;

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub token: String,
    pub targets: Vec<Target>,
    pub workers: usize,
    pub probe: ProbeSettings,
    pub api_url: String,
    pub link_host: String,
    pub json: bool,
}

impl AuditConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, AuditError> {
        // Token before targets
        let token = cli
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or(AuditError::MissingToken)?;

        if cli.targets.is_empty() {
            return Err(AuditError::NoTargets);
        }
        if cli.workers == 0 {
            return Err(AuditError::NoWorkers);
        }

        let targets = cli
            .targets
            .iter()
            .map(|arg| Target::parse(arg))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            token,
            targets,
            workers: cli.workers,
            probe: ProbeSettings {
                timeout: Duration::from_secs(cli.timeout_secs),
                fallback_timeout: Duration::from_secs(cli.fallback_timeout_secs),
                rate_limit: RateLimitPolicy {
                    max_retries: cli.max_rate_limit_retries,
                    max_backoff: Duration::from_secs(cli.rate_limit_backoff_secs),
                },
            },
            api_url: cli.api_url,
            link_host: cli.link_host,
            json: cli.json,
        })
    }
}
