//! Interpretation of the transcription service's submit and result answers.

use serde_json::Value;

use super::{api::ApiResponse, TranscriptionError};

/// What to do after one result poll
#[derive(Debug)]
pub(crate) enum PollStep {
    Completed(Value),
    Pending,
    Failed(TranscriptionError),
}

/// Extracts the task id of an accepted submission (HTTP 200, 201 or 202)
pub(crate) fn classify_submission(resp: &ApiResponse) -> Result<String, TranscriptionError> {
    if !matches!(resp.status, 200 | 201 | 202) {
        return Err(TranscriptionError::Submit(format!(
            "HTTP {}: {}",
            resp.status, resp.body
        )));
    }

    let body = serde_json::from_str::<Value>(&resp.body).map_err(|e| {
        TranscriptionError::Submit(format!("response is not valid JSON ({e}): {}", resp.body))
    })?;

    match body.get("task_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(TranscriptionError::Submit(format!(
            "response has no task_id: {}",
            resp.body
        ))),
    }
}

pub(crate) fn classify_poll(task_id: &str, resp: &ApiResponse) -> PollStep {
    match resp.status {
        200 => {}
        202 => return PollStep::Pending,
        404 => {
            return PollStep::Failed(TranscriptionError::TaskNotFound {
                task_id: task_id.to_string(),
            })
        }
        status => {
            return PollStep::Failed(TranscriptionError::UnexpectedStatus {
                task_id: task_id.to_string(),
                status,
                body: resp.body.clone(),
            })
        }
    }

    let body = match serde_json::from_str::<Value>(&resp.body) {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(task_id, error = %e, "Result body is not valid JSON, still waiting");
            return PollStep::Pending;
        }
    };

    let status = body
        .get("status")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_ascii_uppercase();

    match status.as_str() {
        "SUCCESS" => PollStep::Completed(body),
        "FAILED" => {
            let reason = ["error", "message"]
                .iter()
                .find_map(|k| body.get(*k).and_then(Value::as_str))
                .unwrap_or("no reason given")
                .to_string();
            PollStep::Failed(TranscriptionError::Failed { reason })
        }
        "RUNNING" => PollStep::Pending,
        other => {
            tracing::warn!(
                task_id,
                status = other,
                "Unrecognized transcription status, still waiting"
            );
            PollStep::Pending
        }
    }
}
