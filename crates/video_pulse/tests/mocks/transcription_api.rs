use serde_json::{json, Value};
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use video_pulse::transcription::{ApiResponse, SubmitRequest, TranscriptionApi};

/// One scripted answer of the transcription service
#[derive(Clone)]
pub enum Reply {
    Http(u16, Value),
    Raw(u16, String),
    TransportError,
}

impl Reply {
    fn into_result(self) -> anyhow::Result<ApiResponse> {
        match self {
            Reply::Http(status, body) => Ok(ApiResponse {
                status,
                body: body.to_string(),
            }),
            Reply::Raw(status, body) => Ok(ApiResponse { status, body }),
            Reply::TransportError => Err(anyhow::anyhow!("operation timed out")),
        }
    }
}

/// Replays scripted answers; once the poll script runs out every poll reports `RUNNING`
#[derive(Clone)]
pub struct ScriptedTranscriptionApi {
    pub configured: bool,
    pub submit_reply: Reply,
    pub poll_replies: Arc<Mutex<VecDeque<Reply>>>,
    pub submits: Arc<Mutex<Vec<SubmitRequest>>>,
    pub polls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTranscriptionApi {
    pub fn new(submit_reply: Reply, poll_replies: Vec<Reply>) -> Self {
        Self {
            configured: true,
            submit_reply,
            poll_replies: Arc::new(Mutex::new(poll_replies.into())),
            submits: Arc::new(Mutex::new(Vec::new())),
            polls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn accepting(poll_replies: Vec<Reply>) -> Self {
        Self::new(Reply::Http(202, json!({ "task_id": "task-1" })), poll_replies)
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::accepting(Vec::new())
        }
    }
}

impl TranscriptionApi for ScriptedTranscriptionApi {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn submit(&self, request: &SubmitRequest) -> anyhow::Result<ApiResponse> {
        self.submits.lock().unwrap().push(request.clone());
        self.submit_reply.clone().into_result()
    }

    async fn fetch_result(&self, task_id: &str) -> anyhow::Result<ApiResponse> {
        self.polls.lock().unwrap().push(task_id.to_string());
        let reply = self
            .poll_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::Http(200, json!({ "status": "RUNNING" })));
        reply.into_result()
    }
}
