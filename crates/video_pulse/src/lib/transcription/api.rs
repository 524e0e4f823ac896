use std::{future::Future, time::Duration};

use anyhow::Context;
use reqwest::Client;
use serde::Serialize;

/// Speaker count hint letting the service detect the number of speakers itself
pub const AUTO_SPEAKERS: i32 = -1;

#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    pub audio_url: String,
    pub min_speakers: i32,
    pub max_speakers: i32,
}

impl SubmitRequest {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            min_speakers: AUTO_SPEAKERS,
            max_speakers: AUTO_SPEAKERS,
        }
    }
}

/// Raw HTTP answer of the transcription service; interpreting it is up to the caller
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Transport to the transcription service.
///
/// `Err` is reserved for requests that got no HTTP answer at all (connection
/// failures, timeouts); every HTTP status comes back as `Ok`.
pub trait TranscriptionApi {
    fn is_configured(&self) -> bool {
        true
    }

    fn submit(
        &self,
        request: &SubmitRequest,
    ) -> impl Future<Output = anyhow::Result<ApiResponse>> + Send;

    fn fetch_result(&self, task_id: &str)
        -> impl Future<Output = anyhow::Result<ApiResponse>> + Send;
}

#[derive(Debug, Clone)]
pub struct HttpTranscriptionApi {
    client: Client,
    base_url: Option<String>,
    submit_timeout: Duration,
    poll_timeout: Duration,
}

impl HttpTranscriptionApi {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
            submit_timeout: Duration::from_secs(60),
            poll_timeout: Duration::from_secs(30),
        }
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<String> {
        let base = self
            .base_url
            .as_deref()
            .context("Transcription service URL is not configured")?;
        Ok(format!("{base}/{path}"))
    }

    async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
        timeout: Duration,
    ) -> anyhow::Result<ApiResponse> {
        let resp = self
            .client
            .post(&url)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, %url, "Failed to make http request"))?;

        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Ok(ApiResponse { status, body })
    }
}

impl TranscriptionApi for HttpTranscriptionApi {
    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    async fn submit(&self, request: &SubmitRequest) -> anyhow::Result<ApiResponse> {
        let url = self.endpoint("transcribe")?;
        self.post_json(url, request, self.submit_timeout).await
    }

    async fn fetch_result(&self, task_id: &str) -> anyhow::Result<ApiResponse> {
        let url = self.endpoint("result")?;
        self.post_json(
            url,
            &serde_json::json!({ "task_id": task_id }),
            self.poll_timeout,
        )
        .await
    }
}
