use crate::config::Config;
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::time::Duration;

/// Thin client for the external performance predictor. Requests are
/// forwarded verbatim and responses relayed verbatim; the only local
/// policy is the bounded wait.
#[derive(Clone)]
pub struct PredictorClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredictorClient {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(&config.ml_base_url, config.ml_timeout_seconds)
    }

    pub fn with_endpoint(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let endpoint = format!("{}/predict", base_url.trim_end_matches('/'));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds.max(1)))
            .build()
            .context("Failed to create prediction HTTP client")?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forwards `payload` unmodified to the predictor and returns its JSON
    /// body unmodified. Every failure mode (timeout, connect error, non-2xx,
    /// unparseable body) surfaces as an error for the caller to collapse.
    pub async fn predict(&self, payload: &Value) -> Result<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .context("Prediction request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read prediction response body")?;

        if !status.is_success() {
            bail!("Prediction service returned {status}: {body}");
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse prediction response: {body}"))
    }
}
