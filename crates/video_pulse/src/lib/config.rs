use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    transcription::PollPolicy,
    types::{ProxyConfig, Resolution},
};

/// Key-value store holding the cached download links
pub const DEFAULT_LINK_STORE_NAME: &str = "youtube-download-links";

/// The widget's inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub channel_urls: Vec<String>,
    pub max_videos_per_channel: u32,
    /// Only keep videos uploaded within this many hours, `0` disables the filter
    pub time_filter: u32,
    pub download_videos: bool,
    pub resolution: Resolution,
    pub use_residential_proxy: bool,
    pub proxy_country: Option<String>,
    pub force_refresh_cache: bool,
    pub transcribe_videos: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            channel_urls: Vec::new(),
            max_videos_per_channel: 1,
            time_filter: 24,
            download_videos: false,
            resolution: Resolution::default(),
            use_residential_proxy: false,
            proxy_country: None,
            force_refresh_cache: false,
            transcribe_videos: false,
        }
    }
}

impl WidgetConfig {
    pub const MAX_VIDEOS_PER_CHANNEL: u32 = 10;

    /// Rejects inputs that must never reach the network
    pub fn validate(&self) -> Result<(), Error> {
        if self.channel_urls.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one channel URL is required".into(),
            ));
        }

        if let Some(blank) = self.channel_urls.iter().position(|u| u.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "channel URL at index {blank} is empty"
            )));
        }

        if !(1..=Self::MAX_VIDEOS_PER_CHANNEL).contains(&self.max_videos_per_channel) {
            return Err(Error::InvalidConfig(format!(
                "max_videos_per_channel must be between 1 and {}, got {}",
                Self::MAX_VIDEOS_PER_CHANNEL,
                self.max_videos_per_channel
            )));
        }

        // the country only matters once the residential proxy is on
        if let Some(country) = self.proxy_country.as_ref().filter(|_| self.use_residential_proxy) {
            if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::InvalidConfig(format!(
                    "proxy_country must be a two-letter country code, got '{country}'"
                )));
            }
        }

        Ok(())
    }

    pub fn proxy(&self) -> ProxyConfig {
        ProxyConfig {
            use_residential: self.use_residential_proxy,
            country: self
                .proxy_country
                .clone()
                .filter(|_| self.use_residential_proxy),
        }
    }
}

/// Secrets and endpoints provided by the environment, read once per run
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub api_token: Option<String>,
    pub transcription_service_url: Option<String>,
}

impl Environment {
    pub const API_TOKEN_VAR: &str = "APIFY_API_KEY";
    pub const TRANSCRIPTION_URL_VAR: &str = "TRANSCRIPTION_SERVICE_URL";

    pub fn from_env() -> Self {
        Self {
            api_token: non_empty_var(Self::API_TOKEN_VAR),
            transcription_service_url: non_empty_var(Self::TRANSCRIPTION_URL_VAR),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Addresses and tuning of the external services
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub apify_base_url: String,
    pub channel_scraper_actor: String,
    pub download_actor: String,
    pub link_store_name: String,
    pub poll_policy: PollPolicy,
    pub freshness_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            apify_base_url: crate::yt::apify::ApifyClient::DEFAULT_BASE_URL.into(),
            channel_scraper_actor: crate::yt::apify::ApifyClient::CHANNEL_SCRAPER_ACTOR.into(),
            download_actor: crate::yt::apify::ApifyClient::VIDEO_DOWNLOADER_ACTOR.into(),
            link_store_name: DEFAULT_LINK_STORE_NAME.into(),
            poll_policy: PollPolicy::default(),
            freshness_timeout: Duration::from_secs(10),
        }
    }
}
