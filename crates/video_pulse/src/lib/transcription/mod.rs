pub mod api;
mod poll;
pub mod remote;
mod transcriber;

pub use api::{ApiResponse, HttpTranscriptionApi, SubmitRequest, TranscriptionApi};
pub use remote::{PollPolicy, RemoteTranscriber, Sleeper, TokioSleeper};
pub use transcriber::{Transcriber, TranscriptionError};
