//! Async HTTP client wrapping the data-plane read API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use nexus_domain::Signal;
use reqwest::{Client, StatusCode};

/// Async HTTP client for the data-plane read API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client targeting the given base URL, with a 5-second
    /// per-request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// `GET /signals[?priority=X]`
    pub async fn list_signals(&self, priority: Option<&str>) -> Result<Vec<Signal>> {
        let mut request = self.client.get(self.url("/signals"));
        if let Some(priority) = priority {
            request = request.query(&[("priority", priority)]);
        }

        let resp = request.send().await.context("GET /signals failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!("GET /signals → {}", resp.status()));
        }
        resp.json().await.context("deserialising signals")
    }

    /// `GET /signals/{id}` — `None` when the signal does not exist.
    pub async fn get_signal(&self, id: &str) -> Result<Option<Signal>> {
        let resp = self
            .client
            .get(self.url(&format!("/signals/{id}")))
            .send()
            .await
            .with_context(|| format!("GET /signals/{id} failed"))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(anyhow!("GET /signals/{id} → {}", resp.status()));
        }
        resp.json().await.map(Some).context("deserialising signal")
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<()> {
        let resp = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .context("GET /health failed")?;

        if !resp.status().is_success() {
            return Err(anyhow!("GET /health → {}", resp.status()));
        }
        Ok(())
    }
}
