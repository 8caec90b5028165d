//! Single-link probing: HEAD first, GET when HEAD is not trusted

use super::LinkVerification;
use crate::config::VerifierConfig;
use crate::crawler::describe_error;
use crate::state::CONNECTION_FAILED;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Retry behaviour for connection-level failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    /// Extra attempts after the first one
    pub retries: u32,

    /// Base delay; attempt `n` waits `backoff * (n + 1)` before retrying
    pub backoff: Duration,
}

impl ProbePolicy {
    /// Builds the policy from verifier configuration
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self {
            retries: config.retries,
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }

    /// Delay after failed attempt `attempt` (zero-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(attempt.saturating_add(1))
    }
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self::from_config(&VerifierConfig::default())
    }
}

/// Returns true if a HEAD answer should be double-checked with GET
///
/// Plenty of servers reject HEAD outright (405, 501) or answer it with a
/// client error while serving GET fine, so every 4xx is re-asked.
pub(crate) fn needs_get_fallback(status: StatusCode) -> bool {
    status == StatusCode::METHOD_NOT_ALLOWED
        || status == StatusCode::NOT_IMPLEMENTED
        || status.is_client_error()
}

/// Checks one URL
///
/// An HTTP answer of any status ends the probe. Only transport failures
/// (refused, DNS, TLS, timeout) are retried; once retries run out the
/// result carries status 0 and the last error.
pub async fn probe(client: &Client, url: &str, policy: &ProbePolicy) -> LinkVerification {
    with_retries(url, policy, || probe_once(client, url)).await
}

async fn with_retries<F, Fut>(
    url: &str,
    policy: &ProbePolicy,
    mut attempt_once: F,
) -> LinkVerification
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<u16, reqwest::Error>>,
{
    let mut attempt = 0;

    loop {
        match attempt_once().await {
            Ok(status) => {
                return LinkVerification {
                    url: url.to_string(),
                    status,
                    error: None,
                };
            }
            Err(e) if attempt >= policy.retries => {
                tracing::debug!("Giving up on {} after {} attempts: {}", url, attempt + 1, e);
                return LinkVerification {
                    url: url.to_string(),
                    status: CONNECTION_FAILED,
                    error: Some(describe_error(&e)),
                };
            }
            Err(e) => {
                let delay = policy.delay_for(attempt);
                tracing::trace!("Attempt {} for {} failed ({}), retrying in {:?}", attempt + 1, url, e, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

async fn probe_once(client: &Client, url: &str) -> Result<u16, reqwest::Error> {
    let head = client.head(url).send().await?;
    let status = head.status();
    if !needs_get_fallback(status) {
        return Ok(status.as_u16());
    }

    tracing::trace!("HEAD {} answered {}, asking again with GET", url, status);
    let get = client.get(url).send().await?;
    Ok(get.status().as_u16())
}
