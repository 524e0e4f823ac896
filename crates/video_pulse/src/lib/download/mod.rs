//! Per-video download link resolution: cached link if it still works,
//! otherwise a fresh link from the download actor, written through to the cache.

pub mod freshness;

use link_store::{KeyValueStore, LinkCache};

use crate::{
    types::{DownloadStatus, ProxyConfig, Resolution, VideoRecord},
    yt::{DownloadResolver, ResolveRequest},
};

pub use freshness::{FreshnessChecker, HttpFreshnessChecker};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSettings {
    pub resolution: Resolution,
    pub proxy: ProxyConfig,
    /// Skip the cache lookup and always ask the download actor
    pub force_refresh_cache: bool,
}

/// Terminal state of a video's download resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// A cached link that passed the freshness probe
    Cached { download_url: String },
    /// A link freshly obtained from the download actor
    Resolved {
        download_url: String,
        cache_written: bool,
    },
    Failed { message: String },
}

impl DownloadOutcome {
    pub fn download_url(&self) -> Option<&str> {
        match self {
            DownloadOutcome::Cached { download_url }
            | DownloadOutcome::Resolved { download_url, .. } => Some(download_url),
            DownloadOutcome::Failed { .. } => None,
        }
    }

    pub fn apply_to(&self, video: &mut VideoRecord) {
        match self {
            DownloadOutcome::Cached { download_url } => video.record_download(
                DownloadStatus::Success,
                "Using cached download link",
                Some(download_url.clone()),
                true,
            ),
            DownloadOutcome::Resolved { download_url, .. } => video.record_download(
                DownloadStatus::Success,
                "Download link resolved",
                Some(download_url.clone()),
                false,
            ),
            DownloadOutcome::Failed { message } => {
                video.record_download(DownloadStatus::Error, message.as_str(), None, false)
            }
        }
    }
}

/// Resolves the download link of `video_url`.
///
/// Never fails: every problem ends up as [`DownloadOutcome::Failed`] so sibling
/// videos keep being processed.
#[tracing::instrument(skip(settings, resolver, checker, cache))]
pub async fn resolve_download<R, F, S>(
    video_url: Option<&str>,
    settings: &DownloadSettings,
    resolver: &R,
    checker: &F,
    cache: &LinkCache<S>,
) -> DownloadOutcome
where
    R: DownloadResolver,
    F: FreshnessChecker,
    S: KeyValueStore,
{
    let Some(video_url) = video_url else {
        return DownloadOutcome::Failed {
            message: "missing video URL".into(),
        };
    };

    if settings.force_refresh_cache {
        tracing::debug!("Cache refresh forced, skipping lookup");
    } else if let Some(cached) = cache.get(video_url, settings.resolution).await {
        if checker.is_valid(&cached).await {
            tracing::info!("Using cached download link");
            return DownloadOutcome::Cached {
                download_url: cached,
            };
        }
        tracing::info!("Cached download link expired, resolving a fresh one");
    }

    let request = ResolveRequest {
        video_url,
        resolution: settings.resolution,
        proxy: &settings.proxy,
    };

    match resolver.resolve(&request).await {
        Ok(Some(download_url)) => {
            let cache_written = cache
                .put(video_url, &download_url, settings.resolution)
                .await;
            if !cache_written {
                tracing::warn!("Resolved link could not be cached");
            }
            DownloadOutcome::Resolved {
                download_url,
                cache_written,
            }
        }
        Ok(None) => {
            tracing::warn!("Download actor returned no link");
            DownloadOutcome::Failed {
                message: "no download link found".into(),
            }
        }
        Err(e) => {
            tracing::error!(error = ?e, "Download link resolution failed");
            DownloadOutcome::Failed {
                message: format!("Download link resolution failed: {e:#}"),
            }
        }
    }
}
