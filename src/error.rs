// src/error.rs
// =============================================================================
// Every error the auditor can run into, in one enum.
//
// Which of these are fatal is decided by the orchestrator and main.rs:
// - Configuration errors abort before any network work happens
// - Discovery errors (listing an org, fetching a README) abort the run
// - MalformedLink never aborts, it becomes a failed link outcome
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Environment variable `GH_SECRET` needs to be set")]
    MissingToken,

    #[error("You need to specify which organizations or repositories you want to check")]
    NoTargets,

    #[error("Invalid target `{0}`: expected `owner/name` or an organization name")]
    InvalidTarget(String),

    #[error("The worker pool needs at least one worker")]
    NoWorkers,

    #[error("The GitHub token cannot be sent as an HTTP header")]
    InvalidToken,

    #[error("Failed to list repositories for organization `{org}`: {reason}")]
    ListRepositories { org: String, reason: String },

    #[error("Failed to fetch README for `{repo}`: {reason}")]
    FetchReadme { repo: String, reason: String },

    #[error("Malformed link `{link}`: {reason}")]
    MalformedLink {
        link: String,
        #[source]
        reason: url::ParseError,
    },

    #[error("The job queue closed before every link was submitted")]
    QueueClosed,

    #[error("The result aggregator stopped before the report was complete")]
    AggregatorStopped,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AuditError {
    /// True for errors that stop the run before any network work.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AuditError::MissingToken
                | AuditError::NoTargets
                | AuditError::InvalidTarget(_)
                | AuditError::NoWorkers
                | AuditError::InvalidToken
        )
    }
}
