pub mod config;
pub mod download;
mod error;
pub mod filter;
mod processor;
pub mod tracing;
pub mod transcription;
pub mod types;
mod widget;
pub mod yt;

#[cfg(test)]
mod test_server;

pub use config::{Environment, ServiceSettings, WidgetConfig};
pub use error::Error;
pub use processor::{builder::VideoProcessorBuilder, VideoProcessor};
pub use transcription::{RemoteTranscriber, Transcriber, TranscriptionError};
pub use types::{DownloadStatus, Resolution, TranscriptionStatus, VideoRecord, WidgetOutput};
pub use widget::execute;
