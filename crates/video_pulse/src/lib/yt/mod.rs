pub mod apify;

use std::future::Future;

use crate::types::{ProxyConfig, Resolution, VideoRecord};

/// Lists the latest videos of YouTube channels
pub trait ChannelSource {
    fn fetch_channel_videos(
        &self,
        request: &ChannelRequest,
    ) -> impl Future<Output = anyhow::Result<Vec<VideoRecord>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRequest {
    pub channel_urls: Vec<String>,
    /// Upper bound of videos returned per channel, newest first
    pub max_results_per_channel: usize,
}

/// Turns a video page URL into a direct media download link
pub trait DownloadResolver {
    /// `Ok(None)` when the resolver ran fine but produced no link
    fn resolve(
        &self,
        request: &ResolveRequest<'_>,
    ) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest<'a> {
    pub video_url: &'a str,
    pub resolution: Resolution,
    pub proxy: &'a ProxyConfig,
}
