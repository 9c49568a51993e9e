// src/audit/run.rs
// =============================================================================
// The orchestrator: turns the configured targets into a finished Report.
//
// What happens here:
// 1. Resolve targets: repositories as given, organizations expanded by
//    listing their repositories
// 2. Start the aggregator and the worker pool
// 3. For each repository fetch the README (no README = skip it), extract
//    its links, normalize them and submit one job per link
// 4. Wait on the completion barrier, stop the pool, collect the Report
//
// Listing and README errors other than "not found" abort the run. A link
// that can't be normalized is reported as failed and the run carries on.
// =============================================================================

use std::sync::Arc;

use super::job::{CheckOutcome, LinkCheckJob};
use super::pool::WorkerPool;
use super::report::{Report, Reporter};
use crate::checker::{extract_links, LinkNormalizer, Probe};
use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::github::{RepoSource, RepositoryRef, Target};

pub async fn run_audit(
    config: &AuditConfig,
    source: &dyn RepoSource,
    probe: Arc<dyn Probe>,
) -> Result<Report, AuditError> {
    let progress = !config.json;

    let repositories = resolve_repositories(&config.targets, source, progress).await?;
    if repositories.is_empty() {
        return Err(AuditError::NoTargets);
    }

    let (reporter, aggregator) = Reporter::spawn(progress);
    let pool = WorkerPool::spawn(config.workers, probe, reporter.clone())?;
    let normalizer = LinkNormalizer::new(config.link_host.clone());

    // Jobs handed to the pool plus malformed links recorded directly
    let mut expected = 0;

    for repo in &repositories {
        let Some(readme) = source.fetch_readme(repo).await? else {
            tracing::info!(repo = %repo, "no README found, skipping");
            continue;
        };

        let links = extract_links(&readme);
        tracing::debug!(repo = %repo, links = links.len(), "extracted README links");

        for raw in links {
            match normalizer.normalize(repo, &raw) {
                Ok(url) => {
                    pool.submit(LinkCheckJob::new(repo.clone(), url)).await?;
                    expected += 1;
                }
                Err(e) => {
                    tracing::debug!(repo = %repo, link = %raw, error = %e, "could not normalize link");
                    reporter.record(CheckOutcome::failed(
                        LinkCheckJob::new(repo.clone(), raw),
                        e.to_string(),
                    ));
                    expected += 1;
                }
            }
        }
    }

    pool.wait().await;
    debug_assert_eq!(
        reporter.recorded(),
        expected,
        "barrier released before every outcome was recorded"
    );
    pool.shutdown().await;

    // The aggregator finishes once the last Reporter is gone
    drop(reporter);
    aggregator.await.map_err(|_| AuditError::AggregatorStopped)
}

async fn resolve_repositories(
    targets: &[Target],
    source: &dyn RepoSource,
    progress: bool,
) -> Result<Vec<RepositoryRef>, AuditError> {
    let mut repositories = Vec::new();
    let mut organizations = Vec::new();

    for target in targets {
        match target {
            Target::Repository(repo) => {
                if progress {
                    println!("Using `{}` as a repository", repo);
                }
                repositories.push(repo.clone());
            }
            Target::Organization(org) => {
                if progress {
                    println!("Using `{}` as a organization", org);
                }
                organizations.push(org);
            }
        }
    }
    if progress {
        println!();
    }

    for org in organizations {
        let names = source.list_org_repos(org).await?;
        repositories.extend(names.into_iter().map(|name| RepositoryRef::new(org.as_str(), name)));
    }

    Ok(repositories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{HttpProbe, ProbeResult, ProbeSettings, RateLimitPolicy};
    use crate::github::GitHubClient;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(targets: &[&str]) -> AuditConfig {
        AuditConfig {
            token: "secret".to_string(),
            targets: targets.iter().map(|t| Target::parse(t).unwrap()).collect(),
            workers: 4,
            probe: ProbeSettings::default(),
            api_url: String::new(),
            link_host: "github.com".to_string(),
            json: true,
        }
    }

    // In-memory RepoSource: org -> repo names, "owner/name" -> README
    #[derive(Default)]
    struct FakeSource {
        orgs: HashMap<String, Vec<String>>,
        readmes: HashMap<String, String>,
    }

    #[async_trait]
    impl RepoSource for FakeSource {
        async fn list_org_repos(&self, org: &str) -> Result<Vec<String>, AuditError> {
            self.orgs
                .get(org)
                .cloned()
                .ok_or_else(|| AuditError::ListRepositories {
                    org: org.to_string(),
                    reason: "HTTP 404 Not Found".to_string(),
                })
        }

        async fn fetch_readme(&self, repo: &RepositoryRef) -> Result<Option<String>, AuditError> {
            Ok(self.readmes.get(&repo.full_name()).cloned())
        }
    }

    // Everything passes except URLs mentioning "broken"
    struct NameProbe;

    #[async_trait]
    impl Probe for NameProbe {
        async fn probe(&self, url: &str) -> ProbeResult {
            if url.contains("broken") {
                ProbeResult::failed("404 Not Found")
            } else {
                ProbeResult::ok()
            }
        }
    }

    #[tokio::test]
    async fn test_end_to_end_one_ok_one_missing() {
        let server = MockServer::start().await;
        let readme = format!(
            "# Widgets\n\n[docs]({uri}/docs) and [old]({uri}/old-page)\n",
            uri = server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/repos/acme/widgets/readme"))
            .respond_with(ResponseTemplate::new(200).set_body_string(readme))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/docs"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/old-page"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut config = config(&["acme/widgets"]);
        config.api_url = server.uri();

        let source = GitHubClient::new(&config.token, &config.api_url).unwrap();
        let probe = HttpProbe::new(ProbeSettings {
            timeout: Duration::from_secs(2),
            fallback_timeout: Duration::from_secs(2),
            rate_limit: RateLimitPolicy {
                max_retries: 1,
                max_backoff: Duration::ZERO,
            },
        })
        .unwrap();

        let report = run_audit(&config, &source, Arc::new(probe)).await.unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.is_clean());
        assert_eq!(report.failures[0].job.url, format!("{}/old-page", server.uri()));
        assert_eq!(report.failures[0].detail, "404 Not Found");
    }

    #[tokio::test]
    async fn test_missing_readme_is_skipped() {
        let mut source = FakeSource::default();
        source.readmes.insert(
            "acme/widgets".to_string(),
            "[a](https://example.com/a) [b](https://example.com/broken)".to_string(),
        );

        let config = config(&["acme/widgets", "acme/no-readme"]);
        let report = run_audit(&config, &source, Arc::new(NameProbe)).await.unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.failure_count(), 1);
        assert!(report
            .failures
            .iter()
            .all(|f| f.job.repository.full_name() == "acme/widgets"));
    }

    #[tokio::test]
    async fn test_organization_is_expanded() {
        let mut source = FakeSource::default();
        source
            .orgs
            .insert("acme".to_string(), vec!["one".to_string(), "two".to_string()]);
        source
            .readmes
            .insert("acme/one".to_string(), "[x](https://example.com/x)".to_string());
        source
            .readmes
            .insert("acme/two".to_string(), "![y](img/broken.png)".to_string());

        let report = run_audit(&config(&["acme"]), &source, Arc::new(NameProbe))
            .await
            .unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(
            report.failures[0].job.url,
            "https://github.com/acme/two/blob/master/img/broken.png"
        );
    }

    #[tokio::test]
    async fn test_malformed_link_is_a_failure_not_an_abort() {
        let mut source = FakeSource::default();
        source.readmes.insert(
            "acme/widgets".to_string(),
            "[bad](http://[::1) [good](https://example.com/ok)".to_string(),
        );

        let report = run_audit(&config(&["acme/widgets"]), &source, Arc::new(NameProbe))
            .await
            .unwrap();

        assert_eq!(report.checked, 2);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures[0].job.url, "http://[::1");
        assert!(report.failures[0].detail.starts_with("Malformed link"));
    }

    #[tokio::test]
    async fn test_listing_error_aborts() {
        let source = FakeSource::default();
        let result = run_audit(&config(&["ghost-org"]), &source, Arc::new(NameProbe)).await;
        assert!(matches!(result, Err(AuditError::ListRepositories { .. })));
    }

    #[tokio::test]
    async fn test_empty_organization_has_no_targets() {
        let mut source = FakeSource::default();
        source.orgs.insert("empty".to_string(), Vec::new());

        let result = run_audit(&config(&["empty"]), &source, Arc::new(NameProbe)).await;
        assert!(matches!(result, Err(AuditError::NoTargets)));
    }
}
