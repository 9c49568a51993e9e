// src/github/repo.rs
// =============================================================================
// Repository identity and command-line target parsing.
//
// A target on the command line is either:
//   - a repository:   "owner/name" (or a github.com URL pointing at one)
//   - an organization: a bare name without any '/'
// =============================================================================

use std::fmt;

use serde::Serialize;

use crate::error::AuditError;

/// One repository whose README gets audited. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// "owner/name"
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// What the user asked us to audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Repository(RepositoryRef),
    Organization(String),
}

impl Target {
    // Parses one positional argument
    //
    // Supported repository formats:
    //   - owner/name
    //   - https://github.com/owner/name
    //   - github.com/owner/name.git
    //
    // Anything without a '/' is treated as an organization name.
    pub fn parse(arg: &str) -> Result<Self, AuditError> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Err(AuditError::InvalidTarget(arg.to_string()));
        }

        if !arg.contains('/') {
            return Ok(Target::Organization(arg.to_string()));
        }

        // Remove common URL prefixes so pasted links work too
        let path = arg
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("www.")
            .trim_start_matches("github.com/");

        let mut parts = path.split('/');
        let owner = parts.next().unwrap_or_default();
        let name = parts.next().unwrap_or_default().trim_end_matches(".git");

        if owner.is_empty() || name.is_empty() {
            return Err(AuditError::InvalidTarget(arg.to_string()));
        }

        Ok(Target::Repository(RepositoryRef::new(owner, name)))
    }
}
