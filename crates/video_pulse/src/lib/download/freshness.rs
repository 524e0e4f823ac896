use std::{future::Future, time::Duration};

use reqwest::{redirect, Client};

/// Tells whether a previously resolved download link still works
pub trait FreshnessChecker {
    fn is_valid(&self, url: &str) -> impl Future<Output = bool> + Send;
}

/// Probes links with a single `HEAD` request, redirects are not followed
#[derive(Debug, Clone)]
pub struct HttpFreshnessChecker {
    client: Client,
    timeout: Duration,
}

impl HttpFreshnessChecker {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build probe client, using defaults");
                Client::new()
            });

        Self { client, timeout }
    }
}

impl Default for HttpFreshnessChecker {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Success and redirect statuses count as a live link
pub fn is_live_status(status: u16) -> bool {
    (200..=399).contains(&status)
}

impl FreshnessChecker for HttpFreshnessChecker {
    #[tracing::instrument(skip(self))]
    async fn is_valid(&self, url: &str) -> bool {
        if url.trim().is_empty() {
            return false;
        }

        match self.client.head(url).timeout(self.timeout).send().await {
            Ok(resp) => {
                let status = resp.status().as_u16();
                tracing::debug!(status, "Probed download link");
                is_live_status(status)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Download link probe failed");
                false
            }
        }
    }
}
