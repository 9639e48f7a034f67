//! HTTP client for the synthesis service
//!
//! Posts one turn to `<base>/process` and classifies the JSON reply. There is
//! no retry loop: a failed turn is reported once and the user may try again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ProcessRequest, SynthesisClient, SynthesisError, SynthesisResponse};
use crate::config::ApiConfig;

/// Path of the turn endpoint, relative to the base URL
const PROCESS_PATH: &str = "/process";

/// reqwest-backed synthesis client
pub struct HttpSynthesisClient {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl HttpSynthesisClient {
    /// Create a new client from API configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, SynthesisError> {
        debug!(?config, "from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);

        let http = Client::builder().timeout(timeout).build().map_err(SynthesisError::Network)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            timeout,
        })
    }

    /// Full URL of the turn endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PROCESS_PATH)
    }

    fn map_send_error(&self, e: reqwest::Error) -> SynthesisError {
        if e.is_timeout() {
            debug!(timeout = ?self.timeout, "map_send_error: request timed out");
            SynthesisError::Timeout(self.timeout)
        } else {
            debug!(error = %e, "map_send_error: network error");
            SynthesisError::Network(e)
        }
    }
}

#[async_trait]
impl SynthesisClient for HttpSynthesisClient {
    async fn process(&self, request: &ProcessRequest) -> Result<SynthesisResponse, SynthesisError> {
        let url = self.endpoint();
        debug!(%url, session_id = %request.session_id, history_len = request.history.len(), "process: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            debug!(%status, "process: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(body_len = body.len(), "process: success");
        SynthesisResponse::from_body(&body)
    }
}
