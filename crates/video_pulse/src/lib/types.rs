use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    Pending,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionStatus {
    Skipped,
    Success,
    Error,
    /// The remote task never reached a terminal state within the polling budget
    Timeout,
}

/// A channel video as returned by the scraper, enriched with download and
/// transcription results as the run progresses.
///
/// Scraped fields use the scraper's camelCase names, fields added by this crate
/// use snake_case. Scraped fields this crate does not know about are kept in
/// `extra` and written back out untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// ISO-8601 upload timestamp, e.g. `2024-05-01T10:00:00.000Z`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Kept as scraped, the scraper reports both numbers and strings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<Value>,
    /// Kept as scraped, e.g. `"00:12:30"` or seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_members_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_url: Option<String>,

    #[serde(rename = "download_status", default, skip_serializing_if = "Option::is_none")]
    pub download_status: Option<DownloadStatus>,
    #[serde(rename = "download_message", default, skip_serializing_if = "Option::is_none")]
    pub download_message: Option<String>,
    /// `Some(None)` is written out as `null`
    #[serde(rename = "download_url", default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<Option<String>>,
    #[serde(rename = "download_cached", default, skip_serializing_if = "Option::is_none")]
    pub download_cached: Option<bool>,

    #[serde(rename = "transcription_status", default, skip_serializing_if = "Option::is_none")]
    pub transcription_status: Option<TranscriptionStatus>,
    #[serde(rename = "transcript", default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Option<Value>>,
    #[serde(rename = "transcription_message", default, skip_serializing_if = "Option::is_none")]
    pub transcription_message: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

impl VideoRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    /// The video URL, if present and not blank
    pub fn video_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    /// Parses `date`, accepting RFC 3339 (`Z` or offset) and naive timestamps taken as UTC
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let date = self.date.as_deref()?.trim();

        DateTime::parse_from_rfc3339(date)
            .map(|d| d.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|d| d.and_utc())
            })
    }

    pub fn record_download(
        &mut self,
        status: DownloadStatus,
        message: impl Into<String>,
        download_url: Option<String>,
        cached: bool,
    ) {
        self.download_status = Some(status);
        self.download_message = Some(message.into());
        self.download_url = Some(download_url);
        self.download_cached = Some(cached);
    }

    pub fn record_transcription(
        &mut self,
        status: TranscriptionStatus,
        transcript: Option<Value>,
        message: impl Into<String>,
    ) {
        self.transcription_status = Some(status);
        self.transcript = Some(transcript);
        self.transcription_message = Some(message.into());
    }
}

/// Video heights the download actor can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ResolutionValue", into = "u16")]
pub enum Resolution {
    P144,
    P240,
    #[default]
    P360,
    P480,
    P720,
    P1080,
    P1440,
    P2160,
}

impl Resolution {
    pub const ALL: [Resolution; 8] = [
        Resolution::P144,
        Resolution::P240,
        Resolution::P360,
        Resolution::P480,
        Resolution::P720,
        Resolution::P1080,
        Resolution::P1440,
        Resolution::P2160,
    ];

    pub fn height(self) -> u16 {
        match self {
            Resolution::P144 => 144,
            Resolution::P240 => 240,
            Resolution::P360 => 360,
            Resolution::P480 => 480,
            Resolution::P720 => 720,
            Resolution::P1080 => 1080,
            Resolution::P1440 => 1440,
            Resolution::P2160 => 2160,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.height())
    }
}

impl TryFrom<u16> for Resolution {
    type Error = Error;

    fn try_from(height: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|r| r.height() == height)
            .ok_or_else(|| Error::InvalidResolution(height.to_string()))
    }
}

impl FromStr for Resolution {
    type Err = Error;

    /// Accepts `"720"` as well as `"720p"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('p')
            .or_else(|| trimmed.strip_suffix('P'))
            .unwrap_or(trimmed);

        digits
            .parse::<u16>()
            .map_err(|_| Error::InvalidResolution(s.to_string()))
            .and_then(Resolution::try_from)
    }
}

impl From<Resolution> for u16 {
    fn from(resolution: Resolution) -> Self {
        resolution.height()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResolutionValue {
    Height(u16),
    Text(String),
}

impl TryFrom<ResolutionValue> for Resolution {
    type Error = Error;

    fn try_from(value: ResolutionValue) -> Result<Self, Self::Error> {
        match value {
            ResolutionValue::Height(height) => Resolution::try_from(height),
            ResolutionValue::Text(text) => text.parse(),
        }
    }
}

/// How the download actor reaches YouTube
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyConfig {
    pub use_residential: bool,
    /// Two-letter country hint for residential proxies
    pub country: Option<String>,
}

impl ProxyConfig {
    pub fn to_actor_input(&self) -> Value {
        if !self.use_residential {
            return json!({ "useApifyProxy": false });
        }

        let mut proxy = json!({
            "useApifyProxy": true,
            "apifyProxyGroups": ["RESIDENTIAL"],
        });
        if let Some(country) = &self.country {
            proxy["apifyProxyCountry"] = Value::String(country.to_uppercase());
        }
        proxy
    }
}

/// The widget's output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetOutput {
    pub videos: Vec<VideoRecord>,
    pub filtered_count: usize,
    pub total_fetched: usize,
    pub error: Option<String>,
}

impl WidgetOutput {
    pub fn failure(error: impl fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}
