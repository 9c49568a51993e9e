// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - Makes HTTP HEAD requests (lightweight, no body download)
// - Falls back to one GET when the server answers 405 Method Not Allowed
// - Backs off for a random while on 429 Too Many Requests and starts over,
//   up to a configurable number of retries
// - Only a plain 200 counts as alive (redirects are followed first)
//
// Rust concepts:
// - Traits: The worker pool only knows about `Probe`, so tests can plug in
//   a fake that never touches the network
// - async/await: For concurrent network I/O
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};

use crate::error::AuditError;

/// Detail reported when a request never got an HTTP response.
pub const FATAL_ERROR_DETAIL: &str = "Fatal Error";

// Follow redirect chains up to this many hops
const MAX_REDIRECTS: usize = 10;

/// Result of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub success: bool,
    /// Empty on success, human-readable reason otherwise
    pub detail: String,
}

impl ProbeResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            detail: String::new(),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            detail: detail.into(),
        }
    }
}

/// How long to wait when a server rate-limits us, and how often to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Retries after the first 429; once used up the link is reported as failed.
    pub max_retries: u32,
    /// Each backoff sleeps a random duration in [0, max_backoff).
    pub max_backoff: Duration,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RateLimitPolicy {
    /// Picks the next backoff, uniformly at random below `max_backoff`.
    pub fn backoff(&self) -> Duration {
        // Bounds past u64::MAX milliseconds saturate instead of wrapping
        let ceiling = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        if ceiling == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..ceiling))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    /// Timeout of the HEAD request
    pub timeout: Duration,
    /// Shorter timeout of the GET fallback
    pub fallback_timeout: Duration,
    pub rate_limit: RateLimitPolicy,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            fallback_timeout: Duration::from_secs(5),
            rate_limit: RateLimitPolicy::default(),
        }
    }
}

/// A single best-effort reachability check.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeResult;
}

pub struct HttpProbe {
    client: Client,
    settings: ProbeSettings,
}

impl HttpProbe {
    pub fn new(settings: ProbeSettings) -> Result<Self, AuditError> {
        // One client for every worker, so connections get pooled
        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("readme-auditor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, settings })
    }

    // HEAD first. Some servers refuse HEAD with 405, those get exactly one
    // GET with the shorter timeout and its status wins.
    async fn fetch_status(&self, url: &str) -> Result<StatusCode, reqwest::Error> {
        let status = self.client.head(url).send().await?.status();
        if status != StatusCode::METHOD_NOT_ALLOWED {
            return Ok(status);
        }

        tracing::debug!(url, "HEAD not allowed, retrying with GET");
        let response = self
            .client
            .get(url)
            .timeout(self.settings.fallback_timeout)
            .send()
            .await?;
        Ok(response.status())
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeResult {
        let policy = self.settings.rate_limit;
        let mut retries = 0;

        loop {
            let status = match self.fetch_status(url).await {
                Ok(status) => status,
                Err(e) => {
                    // DNS, connect, TLS, timeout... no response to judge
                    tracing::debug!(
                        url,
                        error = %e,
                        timeout = e.is_timeout(),
                        connect = e.is_connect(),
                        "link check failed without a response"
                    );
                    return ProbeResult::failed(FATAL_ERROR_DETAIL);
                }
            };

            if status == StatusCode::TOO_MANY_REQUESTS && retries < policy.max_retries {
                retries += 1;
                let delay = policy.backoff();
                tracing::warn!(
                    url,
                    retry = retries,
                    delay_secs = delay.as_secs_f64(),
                    "{} check is being rate-limited, retrying",
                    url
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            return classify(status);
        }
    }
}

fn classify(status: StatusCode) -> ProbeResult {
    if status == StatusCode::OK {
        return ProbeResult::ok();
    }
    // e.g. "404 Not Found". Codes without a registered reason phrase
    // (520 and friends) are reported as the bare number
    let detail = match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    };
    ProbeResult::failed(detail)
}
