//! Check steps executed by a running service over HTTP

use super::CheckStep;
use crate::check::CheckRequest;
use crate::config::BatchConfig;
use crate::output::CheckResponse;
use crate::SweepError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Posts each step to `<base>/api/check`
///
/// The per-step timeout covers the whole exchange. A step that exceeds it
/// surfaces as `SweepError::Timeout`, which the orchestrator skips.
#[derive(Debug, Clone)]
pub struct RemoteStep {
    client: Client,
    endpoint: Url,
}

impl RemoteStep {
    /// Creates a step targeting the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SweepError> {
        let endpoint = Url::parse(base_url)?.join("/api/check")?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Creates a step using the configured per-step timeout
    pub fn from_config(base_url: &str, config: &BatchConfig) -> Result<Self, SweepError> {
        Self::new(base_url, Duration::from_secs(config.step_timeout_secs))
    }

    /// The full check endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    fn transport_error(&self, source: reqwest::Error) -> SweepError {
        if source.is_timeout() {
            SweepError::Timeout {
                url: self.endpoint.to_string(),
            }
        } else {
            SweepError::Http {
                url: self.endpoint.to_string(),
                source,
            }
        }
    }
}

#[async_trait]
impl CheckStep for RemoteStep {
    async fn run_step(&self, request: CheckRequest) -> Result<CheckResponse, SweepError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies are `{"error": "..."}`; fall back to the reason phrase
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());
            return Err(SweepError::StepFailed {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<CheckResponse>()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
