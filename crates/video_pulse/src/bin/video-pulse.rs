use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use video_pulse::{
    config::ServiceSettings, tracing::init_tracing_subscriber, transcription::PollPolicy,
    Environment, Resolution, WidgetConfig,
};

#[derive(Parser)]
#[command(
    name = "video-pulse",
    about = "Fetch, download and transcribe the latest videos of YouTube channels"
)]
struct Cli {
    /// JSON widget input; flags below are ignored when given
    #[arg(long)]
    input: Option<PathBuf>,

    /// YouTube channel URL, e.g. https://www.youtube.com/@channel (repeatable)
    #[arg(long = "channel-url", required_unless_present = "input")]
    channel_urls: Vec<String>,

    /// Latest videos to keep per channel (1-10)
    #[arg(long, default_value = "1")]
    max_videos: u32,

    /// Only keep videos uploaded within this many hours (0 disables)
    #[arg(long, default_value = "24")]
    time_filter: u32,

    /// Resolve a download link for every video
    #[arg(long)]
    download: bool,

    /// Video resolution: 144, 240, 360, 480, 720, 1080, 1440 or 2160
    #[arg(long, default_value = "360")]
    resolution: Resolution,

    /// Resolve download links through residential proxies
    #[arg(long)]
    residential_proxy: bool,

    /// Two-letter country code of the residential proxy
    #[arg(long)]
    proxy_country: Option<String>,

    /// Ignore cached download links
    #[arg(long)]
    force_refresh_cache: bool,

    /// Transcribe every downloaded video
    #[arg(long)]
    transcribe: bool,

    /// Apify API base URL
    #[arg(long, env = "APIFY_BASE_URL", default_value = "https://api.apify.com/v2")]
    apify_base_url: String,

    /// Actor scraping the channel videos
    #[arg(long, env = "CHANNEL_SCRAPER_ACTOR", default_value = "streamers/youtube-scraper")]
    channel_actor: String,

    /// Actor resolving video download links
    #[arg(
        long,
        env = "VIDEO_DOWNLOADER_ACTOR",
        default_value = "streamers/youtube-video-downloader"
    )]
    download_actor: String,

    /// Key-value store caching the download links
    #[arg(long, env = "LINK_STORE_NAME", default_value = "youtube-download-links")]
    link_store: String,

    /// Seconds between two transcription polls
    #[arg(long, default_value = "5")]
    poll_interval: u64,

    /// Transcription polls before giving up
    #[arg(long, default_value = "60")]
    poll_attempts: u32,
}

impl Cli {
    fn widget_config(&self) -> anyhow::Result<WidgetConfig> {
        if let Some(path) = &self.input {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read widget input {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("Invalid widget input {}", path.display()));
        }

        Ok(WidgetConfig {
            channel_urls: self.channel_urls.clone(),
            max_videos_per_channel: self.max_videos,
            time_filter: self.time_filter,
            download_videos: self.download,
            resolution: self.resolution,
            use_residential_proxy: self.residential_proxy,
            proxy_country: self.proxy_country.clone(),
            force_refresh_cache: self.force_refresh_cache,
            transcribe_videos: self.transcribe,
        })
    }

    fn service_settings(&self) -> ServiceSettings {
        ServiceSettings {
            apify_base_url: self.apify_base_url.clone(),
            channel_scraper_actor: self.channel_actor.clone(),
            download_actor: self.download_actor.clone(),
            link_store_name: self.link_store.clone(),
            poll_policy: PollPolicy {
                interval: Duration::from_secs(self.poll_interval),
                max_attempts: self.poll_attempts,
            },
            ..Default::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = cli.widget_config()?;
    let env = Environment::from_env();

    tracing::info!(
        channels = ?config.channel_urls,
        max_videos = config.max_videos_per_channel,
        time_filter = config.time_filter,
        "Fetching channel videos..."
    );

    let output = video_pulse::execute(config, &env, &cli.service_settings()).await;

    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(error) = output.error {
        anyhow::bail!(error);
    }

    tracing::info!(
        total_fetched = output.total_fetched,
        filtered_count = output.filtered_count,
        "Done"
    );

    Ok(())
}
