// src/github/client.rs
// =============================================================================
// A small GitHub REST API client built directly on reqwest.
//
// Endpoints used:
//   GET /orgs/{org}/repos?per_page=100&page=N   -> repository names
//   GET /repos/{owner}/{name}/readme            -> raw README markdown
//
// Every request is authenticated with the GH_SECRET token. The README is
// requested with `Accept: application/vnd.github.raw` so GitHub sends the
// markdown itself instead of base64 inside a JSON envelope.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::{RepoSource, RepositoryRef};
use crate::error::AuditError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

// GitHub's maximum page size for repository listings
const PER_PAGE: u32 = 100;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";

// We only need the name out of each repository object
#[derive(Debug, Deserialize)]
struct RepoSummary {
    name: String,
}

#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(token: &str, api_url: &str) -> Result<Self, AuditError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AuditError::InvalidToken)?;
        // Keeps the token out of Debug output
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        // GitHub rejects API requests without a User-Agent
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("readme-auditor/", env!("CARGO_PKG_VERSION"))),
        );

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_org_repos(&self, org: &str) -> Result<Vec<String>, AuditError> {
        let url = format!("{}/orgs/{}/repos", self.api_url, org);
        let list_error = |reason: String| AuditError::ListRepositories {
            org: org.to_string(),
            reason,
        };

        let mut names = Vec::new();
        let mut page = 1;

        loop {
            let response = self
                .http
                .get(&url)
                .header(ACCEPT, JSON_MEDIA_TYPE)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await
                .map_err(|e| list_error(e.to_string()))?;

            if !response.status().is_success() {
                return Err(list_error(format!("HTTP {}", response.status())));
            }

            let repos: Vec<RepoSummary> =
                response.json().await.map_err(|e| list_error(e.to_string()))?;
            let fetched = repos.len();
            names.extend(repos.into_iter().map(|r| r.name));

            // A short page means there is nothing after it
            if fetched < PER_PAGE as usize {
                break;
            }
            page += 1;
        }

        tracing::debug!(org, count = names.len(), "listed organization repositories");
        Ok(names)
    }

    async fn fetch_readme(&self, repo: &RepositoryRef) -> Result<Option<String>, AuditError> {
        let url = format!("{}/repos/{}/{}/readme", self.api_url, repo.owner, repo.name);
        let fetch_error = |reason: String| AuditError::FetchReadme {
            repo: repo.full_name(),
            reason,
        };

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, RAW_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        let content = response.text().await.map_err(|e| fetch_error(e.to_string()))?;
        Ok(Some(content))
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why default_headers?
//    - Every request needs the token and a User-Agent
//    - Setting them once on the Client means no call site can forget them
//
// 2. What is #[async_trait]?
//    - Lets a trait have async methods that work behind `&dyn RepoSource`
//    - The macro boxes each returned future behind the scenes
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_page(prefix: &str, count: usize) -> serde_json::Value {
        let repos: Vec<_> = (0..count)
            .map(|i| serde_json::json!({ "name": format!("{}-{}", prefix, i), "private": false }))
            .collect();
        serde_json::Value::Array(repos)
    }

    #[tokio::test]
    async fn test_list_org_repos_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/acme/repos"))
            .and(query_param("page", "1"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_page("a", 100)))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orgs/acme/repos"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_page("b", 3)))
            .expect(1)
            .mount(&server)
            .await;

        let client = GitHubClient::new("secret", &server.uri()).unwrap();
        let names = client.list_org_repos("acme").await.unwrap();

        assert_eq!(names.len(), 103);
        assert_eq!(names[0], "a-0");
        assert_eq!(names[102], "b-2");
    }

    #[tokio::test]
    async fn test_list_org_repos_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/ghost/repos"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = GitHubClient::new("secret", &server.uri()).unwrap();
        let result = client.list_org_repos("ghost").await;

        assert!(matches!(result, Err(AuditError::ListRepositories { .. })));
    }

    #[tokio::test]
    async fn test_fetch_readme_raw() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/readme"))
            .and(header("accept", RAW_MEDIA_TYPE))
            .respond_with(ResponseTemplate::new(200).set_body_string("# Widgets"))
            .mount(&server)
            .await;

        let client = GitHubClient::new("secret", &server.uri()).unwrap();
        let readme = client
            .fetch_readme(&RepositoryRef::new("acme", "widgets"))
            .await
            .unwrap();

        assert_eq!(readme.as_deref(), Some("# Widgets"));
    }

    #[tokio::test]
    async fn test_fetch_readme_not_found_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/empty/readme"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GitHubClient::new("secret", &server.uri()).unwrap();
        let readme = client
            .fetch_readme(&RepositoryRef::new("acme", "empty"))
            .await
            .unwrap();

        assert!(readme.is_none());
    }

    #[tokio::test]
    async fn test_fetch_readme_server_error_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/broken/readme"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = GitHubClient::new("secret", &server.uri()).unwrap();
        let result = client.fetch_readme(&RepositoryRef::new("acme", "broken")).await;

        assert!(matches!(result, Err(AuditError::FetchReadme { .. })));
    }

    #[test]
    fn test_invalid_token_rejected() {
        let result = GitHubClient::new("bad\ntoken", DEFAULT_API_URL);
        assert!(matches!(result, Err(AuditError::InvalidToken)));
    }
}
