use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use video_pulse::{Transcriber, TranscriptionError};

#[derive(Clone, Copy)]
pub enum Behaviour {
    Succeed,
    Fail,
    TimeOut,
}

#[derive(Clone)]
pub struct MockTranscriber {
    pub behaviour: Behaviour,
    pub configured: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockTranscriber {
    fn with(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            configured: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn new() -> Self {
        Self::with(Behaviour::Succeed)
    }

    pub fn failing() -> Self {
        Self::with(Behaviour::Fail)
    }

    pub fn timing_out() -> Self {
        Self::with(Behaviour::TimeOut)
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn transcript_for(media_url: &str) -> Value {
        json!({
            "status": "SUCCESS",
            "transcript": { "text": format!("transcript of {media_url}") }
        })
    }
}

impl Transcriber for MockTranscriber {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn transcribe(&self, media_url: &str) -> Result<Value, TranscriptionError> {
        self.calls.lock().unwrap().push(media_url.to_string());
        match self.behaviour {
            Behaviour::Succeed => Ok(Self::transcript_for(media_url)),
            Behaviour::Fail => Err(TranscriptionError::Failed {
                reason: "speaker diarization crashed".into(),
            }),
            Behaviour::TimeOut => Err(TranscriptionError::TimedOut {
                task_id: "task-1".into(),
                attempts: 60,
            }),
        }
    }
}
