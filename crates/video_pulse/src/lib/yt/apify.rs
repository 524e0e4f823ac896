use anyhow::Context;
use link_store::ApifyKeyValueStores;
use reqwest::Client;
use serde_json::{json, Value};

use crate::{
    types::VideoRecord,
    yt::{ChannelRequest, ChannelSource, DownloadResolver, ResolveRequest},
};

/// Client of the Apify actor API, used both to scrape channels and to resolve
/// download links
#[derive(Debug, Clone)]
pub struct ApifyClient {
    client: Client,
    token: String,
    base_url: String,
    channel_scraper_actor: String,
    download_actor: String,
}

impl ApifyClient {
    pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";
    pub const CHANNEL_SCRAPER_ACTOR: &str = "streamers/youtube-scraper";
    pub const VIDEO_DOWNLOADER_ACTOR: &str = "streamers/youtube-video-downloader";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
            channel_scraper_actor: Self::CHANNEL_SCRAPER_ACTOR.into(),
            download_actor: Self::VIDEO_DOWNLOADER_ACTOR.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_actors(
        mut self,
        channel_scraper_actor: impl Into<String>,
        download_actor: impl Into<String>,
    ) -> Self {
        self.channel_scraper_actor = channel_scraper_actor.into();
        self.download_actor = download_actor.into();
        self
    }

    /// Key-value stores of the same Apify account
    pub fn key_value_stores(&self) -> ApifyKeyValueStores {
        ApifyKeyValueStores::new(&self.token)
            .with_client(self.client.clone())
            .with_base_url(&self.base_url)
    }

    /// Runs an actor to completion and returns the items of its default dataset
    #[tracing::instrument(skip(self, input))]
    pub async fn run_actor(&self, actor_id: &str, input: &Value) -> anyhow::Result<Vec<Value>> {
        // the API addresses `user/actor` as `user~actor`
        let url = format!(
            "{}/acts/{}/run-sync-get-dataset-items",
            self.base_url,
            actor_id.replace('/', "~")
        );

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .with_context(|| format!("Failed to run actor {actor_id}"))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Actor {actor_id} run returned {status}: {message}");
        }

        resp.json::<Vec<Value>>()
            .await
            .with_context(|| format!("Actor {actor_id} returned an unexpected dataset"))
    }
}

pub fn channel_scraper_input(request: &ChannelRequest) -> Value {
    let start_urls = request
        .channel_urls
        .iter()
        .map(|url| json!({ "url": url }))
        .collect::<Vec<_>>();

    json!({
        "startUrls": start_urls,
        "maxResults": request.max_results_per_channel,
        "maxResultsShorts": 0,
        "maxResultStreams": 0,
        "sortVideosBy": "NEWEST",
    })
}

pub fn download_input(request: &ResolveRequest<'_>) -> Value {
    json!({
        "videos": [{ "url": request.video_url }],
        "resolution": request.resolution.to_string(),
        "proxy": request.proxy.to_actor_input(),
    })
}

/// The `downloadUrl` of the first dataset item, if any
pub fn first_download_url(items: &[Value]) -> Option<String> {
    items
        .first()?
        .get("downloadUrl")?
        .as_str()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_owned)
}

impl ChannelSource for ApifyClient {
    async fn fetch_channel_videos(
        &self,
        request: &ChannelRequest,
    ) -> anyhow::Result<Vec<VideoRecord>> {
        let items = self
            .run_actor(&self.channel_scraper_actor, &channel_scraper_input(request))
            .await?;

        Ok(parse_video_items(items))
    }
}

/// Decodes scraper dataset items, skipping items that are not video objects
pub fn parse_video_items(items: Vec<Value>) -> Vec<VideoRecord> {
    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value::<VideoRecord>(item)
                .inspect_err(|e| tracing::warn!(error = %e, "Skipping malformed video item"))
                .ok()
        })
        .collect()
}

impl DownloadResolver for ApifyClient {
    async fn resolve(&self, request: &ResolveRequest<'_>) -> anyhow::Result<Option<String>> {
        let items = self
            .run_actor(&self.download_actor, &download_input(request))
            .await?;

        Ok(first_download_url(&items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProxyConfig, Resolution};

    #[test]
    fn test_parse_video_items_keeps_loosely_typed_videos() {
        let videos = parse_video_items(vec![
            json!({
                "url": "https://www.youtube.com/watch?v=one",
                "isMembersOnly": null,
                "duration": 754,
                "viewCount": null
            }),
            json!({"url": "https://www.youtube.com/watch?v=two", "duration": "00:03:10"}),
            json!("not a video"),
        ]);

        assert_eq!(videos.len(), 2);
        assert!(!videos[0].is_members_only);
        assert_eq!(videos[0].duration, Some(json!(754)));
        assert_eq!(videos[0].view_count, None);
    }

    #[test]
    fn test_channel_scraper_input() {
        let input = channel_scraper_input(&ChannelRequest {
            channel_urls: vec![
                "https://www.youtube.com/@one".into(),
                "https://www.youtube.com/@two".into(),
            ],
            max_results_per_channel: 4,
        });

        assert_eq!(
            input,
            json!({
                "startUrls": [
                    {"url": "https://www.youtube.com/@one"},
                    {"url": "https://www.youtube.com/@two"}
                ],
                "maxResults": 4,
                "maxResultsShorts": 0,
                "maxResultStreams": 0,
                "sortVideosBy": "NEWEST"
            })
        );
    }

    #[test]
    fn test_download_input() {
        let proxy = ProxyConfig {
            use_residential: true,
            country: Some("JP".into()),
        };
        let input = download_input(&ResolveRequest {
            video_url: "https://www.youtube.com/watch?v=abc",
            resolution: Resolution::P720,
            proxy: &proxy,
        });

        assert_eq!(input["videos"][0]["url"], "https://www.youtube.com/watch?v=abc");
        assert_eq!(input["resolution"], "720");
        assert_eq!(input["proxy"]["apifyProxyCountry"], "JP");
    }

    #[test]
    fn test_first_download_url() {
        assert_eq!(first_download_url(&[]), None);
        assert_eq!(first_download_url(&[json!({"title": "x"})]), None);
        assert_eq!(first_download_url(&[json!({"downloadUrl": " "})]), None);
        assert_eq!(
            first_download_url(&[
                json!({"downloadUrl": "https://cdn/1.mp4"}),
                json!({"downloadUrl": "https://cdn/2.mp4"})
            ])
            .as_deref(),
            Some("https://cdn/1.mp4")
        );
    }
}
