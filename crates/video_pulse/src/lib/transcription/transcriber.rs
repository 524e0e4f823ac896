use std::future::Future;

use serde_json::Value;

pub trait Transcriber {
    /// Whether a transcription service is reachable at all. Videos are skipped
    /// instead of failed when this is `false`.
    fn is_configured(&self) -> bool {
        true
    }

    /// Transcribes the media at `media_url`, returning the service's full result payload
    fn transcribe(
        &self,
        media_url: &str,
    ) -> impl Future<Output = Result<Value, TranscriptionError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("Transcription service URL is not configured")]
    NotConfigured,
    #[error("Transcription submission failed: {0}")]
    Submit(String),
    #[error("Transcription task {task_id} not found (HTTP 404)")]
    TaskNotFound { task_id: String },
    #[error("Transcription failed: {reason}")]
    Failed { reason: String },
    #[error("Unexpected HTTP status {status} while polling task {task_id}: {body}")]
    UnexpectedStatus {
        task_id: String,
        status: u16,
        body: String,
    },
    #[error("Transcription task {task_id} did not finish after {attempts} polling attempts")]
    TimedOut { task_id: String, attempts: u32 },
}

impl TranscriptionError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TranscriptionError::TimedOut { .. })
    }
}
