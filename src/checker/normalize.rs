// src/checker/normalize.rs
// =============================================================================
// Turns a raw link from a README into an absolute URL we can probe.
//
// Three shapes of link show up in READMEs:
//   https://example.com/x   absolute, passes through untouched
//   //cdn.example.com/a.js  protocol-relative, gets "https:" in front
//   img/pic.png, /img/pic.png
//                           relative to the repository, rewritten to
//                           https://github.com/<owner>/<name>/blob/master/<path>
//
// Relative links always point at the `master` branch. Repositories whose
// default branch has another name will see those links fail.
// =============================================================================

use url::{ParseError, Url};

use crate::error::AuditError;
use crate::github::RepositoryRef;

pub const DEFAULT_LINK_HOST: &str = "github.com";

// Branch that relative links are resolved against
const BLOB_BRANCH: &str = "master";

#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    host: String,
}

impl Default for LinkNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_LINK_HOST)
    }
}

impl LinkNormalizer {
    /// `host` is where repository blobs live, normally "github.com".
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn normalize(&self, repo: &RepositoryRef, raw: &str) -> Result<String, AuditError> {
        let malformed = |reason: ParseError| AuditError::MalformedLink {
            link: raw.to_string(),
            reason,
        };

        match Url::parse(raw) {
            // Already absolute: leave it exactly as written
            Ok(_) => Ok(raw.to_string()),

            Err(ParseError::RelativeUrlWithoutBase) => {
                // "//host/..." is protocol-relative, "///path" has no host
                // and is just a path with extra slashes
                if let Some(rest) = raw.strip_prefix("//") {
                    if !rest.is_empty() && !rest.starts_with('/') {
                        let url = Url::parse(&format!("https:{}", raw)).map_err(malformed)?;
                        if url.host_str().is_some_and(|host| !host.is_empty()) {
                            return Ok(url.to_string());
                        }
                    }
                }

                // The path is kept as written. Parsing the joined URL would
                // resolve "../" segments and climb out of blob/master/
                let path = raw.trim_start_matches('/');
                let blob = format!(
                    "https://{}/{}/{}/blob/{}/{}",
                    self.host, repo.owner, repo.name, BLOB_BRANCH, path
                );
                Url::parse(&blob).map_err(malformed)?;
                Ok(blob)
            }

            Err(reason) => Err(malformed(reason)),
        }
    }
}
