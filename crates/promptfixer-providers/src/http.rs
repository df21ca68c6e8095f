//! PromptFixer HTTP API backend.
//!
//! Each action is a JSON `POST` of `{"prompt", "mode"}` to
//! `/api/prompt/{score,rewrite,run}`.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use promptfixer_core::error::BackendError;
use promptfixer_core::model::PromptRequest;
use promptfixer_core::traits::PromptBackend;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const SCORE_PATH: &str = "/api/prompt/score";
const REWRITE_PATH: &str = "/api/prompt/rewrite";
const RUN_PATH: &str = "/api/prompt/run";

/// Backend speaking the PromptFixer JSON API.
pub struct HttpBackend {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, api_key: Option<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        let base = if base_url.is_empty() {
            DEFAULT_BASE_URL
        } else {
            base_url
        };

        Ok(Self {
            base_url: base.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            timeout_secs,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &PromptRequest,
    ) -> anyhow::Result<T> {
        let start = Instant::now();

        let mut req = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json");

        if let Some(key) = &self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }

        let response = req.json(request).send().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(self.timeout_secs)
            } else {
                BackendError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(5)
                .saturating_mul(1000);
            return Err(BackendError::RateLimited {
                retry_after_ms: retry_after,
            }
            .into());
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::AuthenticationFailed(body).into());
        }
        if status == 404 {
            return Err(BackendError::EndpointNotFound(path.to_string()).into());
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        tracing::debug!(path, latency_ms = start.elapsed().as_millis() as u64, "backend replied");
        Ok(parsed)
    }
}

#[derive(Deserialize)]
struct ScoreResponse {
    score_feedback: String,
}

#[derive(Deserialize)]
struct RewriteResponse {
    rewrite: String,
}

#[derive(Deserialize)]
struct RunResponse {
    output: String,
}

#[async_trait]
impl PromptBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn score(&self, request: &PromptRequest) -> anyhow::Result<String> {
        let response: ScoreResponse = self.post(SCORE_PATH, request).await?;
        Ok(response.score_feedback)
    }

    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn rewrite(&self, request: &PromptRequest) -> anyhow::Result<String> {
        let response: RewriteResponse = self.post(REWRITE_PATH, request).await?;
        Ok(response.rewrite)
    }

    #[instrument(skip(self, request), fields(mode = %request.mode))]
    async fn run(&self, request: &PromptRequest) -> anyhow::Result<String> {
        let response: RunResponse = self.post(RUN_PATH, request).await?;
        Ok(response.output)
    }
}
