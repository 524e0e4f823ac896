use std::{future::Future, time::Duration};

use serde_json::Value;

use super::{
    api::{HttpTranscriptionApi, SubmitRequest, TranscriptionApi},
    poll::{classify_poll, classify_submission, PollStep},
    Transcriber, TranscriptionError,
};

/// Fixed-interval polling budget of a transcription task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    /// Every 5 seconds for up to 5 minutes
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// Waits between two polls
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Transcriber backed by a remote submit-then-poll transcription service
#[derive(Debug, Clone)]
pub struct RemoteTranscriber<A = HttpTranscriptionApi, Z = TokioSleeper> {
    api: A,
    sleeper: Z,
    policy: PollPolicy,
    min_speakers: i32,
    max_speakers: i32,
}

impl RemoteTranscriber {
    /// A `None` or blank `base_url` yields a transcriber that reports itself unconfigured
    pub fn new(base_url: Option<String>) -> Self {
        Self::with_api(HttpTranscriptionApi::new(base_url), TokioSleeper)
    }
}

impl<A, Z> RemoteTranscriber<A, Z> {
    pub fn with_api(api: A, sleeper: Z) -> Self {
        Self {
            api,
            sleeper,
            policy: PollPolicy::default(),
            min_speakers: super::api::AUTO_SPEAKERS,
            max_speakers: super::api::AUTO_SPEAKERS,
        }
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_speakers(mut self, min_speakers: i32, max_speakers: i32) -> Self {
        self.min_speakers = min_speakers;
        self.max_speakers = max_speakers;
        self
    }
}

impl<A, Z> RemoteTranscriber<A, Z>
where
    A: TranscriptionApi + Sync,
    Z: Sleeper + Sync,
{
    async fn submit(&self, media_url: &str) -> Result<String, TranscriptionError> {
        let request = SubmitRequest {
            min_speakers: self.min_speakers,
            max_speakers: self.max_speakers,
            ..SubmitRequest::new(media_url)
        };

        let resp = self
            .api
            .submit(&request)
            .await
            .map_err(|e| TranscriptionError::Submit(format!("{e:#}")))?;

        classify_submission(&resp)
            .inspect_err(|e| tracing::error!(error = %e, "Transcription submission rejected"))
    }

    async fn wait_for_result(&self, task_id: &str) -> Result<Value, TranscriptionError> {
        for attempt in 1..=self.policy.max_attempts {
            self.sleeper.sleep(self.policy.interval).await;

            let resp = match self.api.fetch_result(task_id).await {
                Ok(resp) => resp,
                Err(e) => {
                    // no HTTP answer at all, the task may still be fine
                    tracing::warn!(error = ?e, attempt, "Polling request failed");
                    continue;
                }
            };

            match classify_poll(task_id, &resp) {
                PollStep::Completed(payload) => {
                    tracing::info!(attempt, "Transcription completed");
                    return Ok(payload);
                }
                PollStep::Failed(e) => {
                    tracing::error!(error = %e, attempt, "Transcription failed");
                    return Err(e);
                }
                PollStep::Pending => tracing::debug!(attempt, "Transcription still running"),
            }
        }

        tracing::warn!(attempts = self.policy.max_attempts, "Gave up waiting for transcription");
        Err(TranscriptionError::TimedOut {
            task_id: task_id.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}

impl<A, Z> Transcriber for RemoteTranscriber<A, Z>
where
    A: TranscriptionApi + Sync,
    Z: Sleeper + Sync,
{
    fn is_configured(&self) -> bool {
        self.api.is_configured()
    }

    #[tracing::instrument(skip(self))]
    async fn transcribe(&self, media_url: &str) -> Result<Value, TranscriptionError> {
        if !self.api.is_configured() {
            return Err(TranscriptionError::NotConfigured);
        }

        let task_id = self.submit(media_url).await?;
        tracing::info!(%task_id, "Transcription submitted");

        self.wait_for_result(&task_id).await
    }
}
