use thiserror::Error;

/// Failures that abort a whole run. Per-video failures never surface here,
/// they are recorded on the video itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing API credential: {0} environment variable is not set")]
    MissingCredential(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid resolution '{0}', expected one of 144, 240, 360, 480, 720, 1080, 1440, 2160")]
    InvalidResolution(String),

    #[error("Failed to initialize link cache store: {0:#}")]
    CacheInit(anyhow::Error),

    #[error("Failed to fetch channel videos: {0:#}")]
    ChannelFetch(anyhow::Error),
}
