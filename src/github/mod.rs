// src/github/mod.rs
// =============================================================================
// This module handles everything we need from GitHub.
//
// Currently implements:
// - Parsing command-line targets into repositories / organizations
// - Listing every repository in an organization (REST API, paginated)
// - Fetching a repository's README as raw markdown (REST API)
//
// The orchestrator only talks to the RepoSource trait, so tests can swap in
// a local mock server or a fake source.
// =============================================================================

mod client;
mod repo;

use async_trait::async_trait;

use crate::error::AuditError;

pub use client::{GitHubClient, DEFAULT_API_URL};
pub use repo::{RepositoryRef, Target};

/// Where repository lists and README text come from.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Names of every repository owned by `org`.
    async fn list_org_repos(&self, org: &str) -> Result<Vec<String>, AuditError>;

    /// Raw README text, or `None` when the repository has no README.
    async fn fetch_readme(&self, repo: &RepositoryRef) -> Result<Option<String>, AuditError>;
}
