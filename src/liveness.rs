//! Optional liveness probing of sitemap URLs.
//!
//! Probes only ever produce warnings. Each probe is a `HEAD` request with its
//! own timeout; at most one redirect hop is followed.

use futures::future::join_all;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::SitemapError;
use crate::run::ValidationRun;

/// Redirect hops followed before a probe gives up
pub const MAX_REDIRECT_HOPS: u32 = 1;

/// Configuration for liveness probes
#[derive(Debug, Clone)]
pub struct LivenessConfig {
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
    /// Maximum number of probes in flight at once
    pub max_concurrent_probes: usize,
    /// User agent string
    pub user_agent: String,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 5,
            max_concurrent_probes: 16,
            user_agent: default_user_agent(),
        }
    }
}

/// Fixed identifying user agent for probes
pub fn default_user_agent() -> String {
    format!(
        "validate-sitemaps/{} (+sitemap liveness check)",
        env!("CARGO_PKG_VERSION")
    )
}

/// HTTP `HEAD` prober for sitemap URLs
#[derive(Debug, Clone)]
pub struct LivenessChecker {
    client: Client,
    config: LivenessConfig,
}

impl LivenessChecker {
    /// Create a new checker; redirects are handled manually
    pub fn new(config: LivenessConfig) -> Result<Self, SitemapError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(Policy::none())
            .pool_idle_timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(SitemapError::from)?;

        Ok(Self { client, config })
    }

    /// Probe a URL, returning a warning message for anything but a 200
    pub async fn check(&self, url: &str) -> Option<String> {
        let mut current = url.to_string();
        let mut hops = 0;

        // Use a loop instead of recursion to avoid boxing the future
        loop {
            let response = match self.make_request(&current).await {
                Ok(response) => response,
                Err(SitemapError::Timeout {
                    timeout_seconds, ..
                }) => {
                    return Some(format!(
                        "{}: Request timed out after {}s",
                        current, timeout_seconds
                    ));
                }
                Err(e) => return Some(format!("{}: Request failed: {}", current, e)),
            };

            let status = response.status();
            debug!(url = %current, status = status.as_u16(), "Liveness probe response");

            if status == StatusCode::OK {
                return None;
            }

            if status.is_redirection()
                && let Some(location) = redirect_location(&response)
            {
                if hops >= MAX_REDIRECT_HOPS {
                    return Some(format!("{}: Redirect chain exceeding 1 hop", current));
                }

                match response.url().join(&location) {
                    Ok(next) => {
                        debug!(from = %current, to = %next, "Following redirect");
                        current = next.to_string();
                        hops += 1;
                        continue;
                    }
                    Err(e) => {
                        return Some(format!(
                            "{}: Invalid redirect location '{}': {}",
                            current, location, e
                        ));
                    }
                }
            }

            return Some(format!("{}: HTTP status {}", current, status.as_u16()));
        }
    }

    /// Make a single HEAD request with timeout; the request is dropped on expiry
    async fn make_request(&self, url: &str) -> Result<Response, SitemapError> {
        let request_future = self.client.head(url).send();

        timeout(
            Duration::from_secs(self.config.timeout_seconds),
            request_future,
        )
        .await
        .map_err(|_| SitemapError::Timeout {
            url: url.to_string(),
            timeout_seconds: self.config.timeout_seconds,
        })?
        .map_err(SitemapError::from)
    }

    /// Get the checker configuration
    pub fn config(&self) -> &LivenessConfig {
        &self.config
    }
}

fn redirect_location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Bounded group of in-flight probes.
///
/// One task is spawned per URL; a semaphore caps how many run at once. The
/// group is joined before the report is produced, so every outcome is
/// counted.
pub struct ProbeGroup {
    checker: LivenessChecker,
    semaphore: Arc<Semaphore>,
    tasks: Vec<JoinHandle<Option<String>>>,
}

impl ProbeGroup {
    pub fn new(checker: LivenessChecker) -> Self {
        let permits = checker.config().max_concurrent_probes.max(1);
        Self {
            checker,
            semaphore: Arc::new(Semaphore::new(permits)),
            tasks: Vec::new(),
        }
    }

    /// Dispatch a probe for `url` without waiting for it
    pub fn spawn(&mut self, url: String) {
        let checker = self.checker.clone();
        let semaphore = Arc::clone(&self.semaphore);

        self.tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.ok()?;
            checker.check(&url).await
        }));
    }

    /// Number of probes dispatched so far
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait for every probe and append its warning, in dispatch order
    pub async fn join(self, run: &mut ValidationRun) {
        for result in join_all(self.tasks).await {
            match result {
                Ok(Some(message)) => {
                    warn!(%message, "Liveness check failed");
                    run.warning(message);
                }
                Ok(None) => {}
                Err(e) => run.warning(format!("Liveness probe task failed: {}", e)),
            }
        }
    }
}
