//! HTTP client for the remote live mixer.
//!
//! Production [`EventSink`] implementation: plain HTTP POSTs with JSON
//! bodies, one request per call, per-request timeout. No retry logic lives
//! here - the core's policy is fire-and-forget per event, and start/stop
//! failures are surfaced to the caller for retry.

use std::time::Duration;

use async_trait::async_trait;
use jukeproto::{EventSink, MixerEvent, SessionRequest, SinkError};
use serde::Serialize;

pub struct MixerClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl MixerClient {
    /// Create a client for the mixer at `base_url` (e.g. "http://mixer:9000").
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), SinkError> {
        let response = self
            .client
            .post(format!("{}/{}", self.base_url, path))
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EventSink for MixerClient {
    async fn start(&self, id: &str) -> Result<(), SinkError> {
        self.post_json(
            "record/start",
            &SessionRequest { id: id.to_string() },
        )
        .await
    }

    async fn stop(&self, id: &str) -> Result<(), SinkError> {
        self.post_json(
            "record/stop",
            &SessionRequest { id: id.to_string() },
        )
        .await
    }

    async fn send(&self, event: &MixerEvent) -> Result<(), SinkError> {
        self.post_json("event", event).await
    }
}
