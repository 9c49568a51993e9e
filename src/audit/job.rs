// src/audit/job.rs
// =============================================================================
// The two values that flow through the pipeline:
//   LinkCheckJob  - one (repository, url) pair waiting to be probed
//   CheckOutcome  - what probing that job produced
// =============================================================================

use serde::Serialize;

use crate::checker::ProbeResult;
use crate::github::RepositoryRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCheckJob {
    pub repository: RepositoryRef,
    pub url: String,
}

impl LinkCheckJob {
    pub fn new(repository: RepositoryRef, url: impl Into<String>) -> Self {
        Self {
            repository,
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub job: LinkCheckJob,
    pub success: bool,
    /// Empty on success
    pub detail: String,
}

impl CheckOutcome {
    pub fn from_probe(job: LinkCheckJob, result: ProbeResult) -> Self {
        Self {
            job,
            success: result.success,
            detail: result.detail,
        }
    }

    pub fn failed(job: LinkCheckJob, detail: impl Into<String>) -> Self {
        Self {
            job,
            success: false,
            detail: detail.into(),
        }
    }

    // The line printed while the audit runs, and again under "ALL ERRORS"
    // for failures:
    //   ✅ OK    acme/widgets https://example.com
    //   ❌ FAIL  acme/widgets https://example.com/gone - 404 Not Found
    pub fn line(&self) -> String {
        if self.success {
            format!("  ✅ OK    {} {}", self.job.repository, self.job.url)
        } else {
            format!(
                "  ❌ FAIL  {} {} - {}",
                self.job.repository, self.job.url, self.detail
            )
        }
    }
}
