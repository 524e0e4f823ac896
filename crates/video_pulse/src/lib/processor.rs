pub mod builder;

use chrono::Utc;
use link_store::{KeyValueStore, LinkCache, StoreProvider};

use crate::{
    config::WidgetConfig,
    download::{resolve_download, DownloadSettings, FreshnessChecker},
    error::Error,
    filter::select_videos,
    types::{DownloadStatus, TranscriptionStatus, VideoRecord, WidgetOutput},
    yt::{ChannelRequest, ChannelSource, DownloadResolver},
    Transcriber,
};

// Fetches, filters and enriches the latest videos of the configured channels
#[derive(Debug)]
pub struct VideoProcessor<C, R, F, P, T>
where
    C: ChannelSource + Send + Sync + 'static,
    R: DownloadResolver + Send + Sync + 'static,
    F: FreshnessChecker + Send + Sync + 'static,
    P: StoreProvider + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    config: WidgetConfig,
    link_store_name: String,
    channel_source: C,
    download_resolver: R,
    freshness_checker: F,
    store_provider: P,
    transcriber: T,
}

impl<C, R, F, P, T> VideoProcessor<C, R, F, P, T>
where
    C: ChannelSource + Send + Sync + 'static,
    R: DownloadResolver + Send + Sync + 'static,
    F: FreshnessChecker + Send + Sync + 'static,
    P: StoreProvider + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    /// Over-fetch factor so enough videos remain after members-only filtering
    const FETCH_FACTOR: usize = 2;

    /// Runs the whole widget. Run-level failures come back as an empty output
    /// carrying the error message, per-video failures are recorded on the videos.
    #[tracing::instrument(skip(self), fields(channels = self.config.channel_urls.len()))]
    pub async fn run(&self) -> WidgetOutput {
        match self.try_run().await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                WidgetOutput::failure(e)
            }
        }
    }

    async fn try_run(&self) -> Result<WidgetOutput, Error> {
        self.config.validate()?;

        let cache = if self.config.download_videos {
            Some(self.open_link_cache().await?)
        } else {
            None
        };

        let max_per_channel = self.config.max_videos_per_channel as usize;
        let request = ChannelRequest {
            channel_urls: self.config.channel_urls.clone(),
            max_results_per_channel: max_per_channel * Self::FETCH_FACTOR,
        };

        let fetched = self
            .channel_source
            .fetch_channel_videos(&request)
            .await
            .map_err(Error::ChannelFetch)?;
        tracing::info!(count = fetched.len(), "Fetched channel videos");

        let selection = select_videos(
            fetched,
            max_per_channel,
            self.config.time_filter,
            Utc::now(),
        );
        let mut videos = selection.videos;
        tracing::info!(
            total_fetched = selection.total_fetched,
            filtered_count = videos.len(),
            "Selected videos"
        );

        if let Some(cache) = &cache {
            for video in videos.iter_mut() {
                self.process_video(video, cache).await;
            }
        }

        Ok(WidgetOutput {
            filtered_count: videos.len(),
            total_fetched: selection.total_fetched,
            videos,
            error: None,
        })
    }

    async fn open_link_cache(&self) -> Result<LinkCache<P::Store>, Error> {
        let store = self
            .store_provider
            .get_or_create(&self.link_store_name)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to open link store"))
            .map_err(Error::CacheInit)?;

        Ok(LinkCache::new(store))
    }

    fn download_settings(&self) -> DownloadSettings {
        DownloadSettings {
            resolution: self.config.resolution,
            proxy: self.config.proxy(),
            force_refresh_cache: self.config.force_refresh_cache,
        }
    }

    #[tracing::instrument(skip_all, fields(video_url = ?video.url))]
    async fn process_video<S: KeyValueStore>(&self, video: &mut VideoRecord, cache: &LinkCache<S>) {
        video.download_status = Some(DownloadStatus::Pending);

        let outcome = resolve_download(
            video.video_url(),
            &self.download_settings(),
            &self.download_resolver,
            &self.freshness_checker,
            cache,
        )
        .await;
        outcome.apply_to(video);

        // cached links are transcribed again, transcripts are never cached
        let media_url = match outcome.download_url() {
            Some(url) => url,
            None => {
                video.record_transcription(
                    TranscriptionStatus::Skipped,
                    None,
                    "download link unavailable",
                );
                return;
            }
        };

        if !self.config.transcribe_videos {
            video.record_transcription(
                TranscriptionStatus::Skipped,
                None,
                "transcription not requested",
            );
            return;
        }

        if !self.transcriber.is_configured() {
            video.record_transcription(
                TranscriptionStatus::Skipped,
                None,
                "transcription service not configured",
            );
            return;
        }

        match self.transcriber.transcribe(media_url).await {
            Ok(transcript) => video.record_transcription(
                TranscriptionStatus::Success,
                Some(transcript),
                "Transcription completed",
            ),
            Err(e) if e.is_timeout() => {
                video.record_transcription(TranscriptionStatus::Timeout, None, e.to_string())
            }
            Err(e) => video.record_transcription(TranscriptionStatus::Error, None, e.to_string()),
        }
    }
}
