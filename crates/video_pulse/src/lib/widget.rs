use crate::{
    config::{Environment, ServiceSettings, WidgetConfig},
    download::HttpFreshnessChecker,
    error::Error,
    types::WidgetOutput,
    yt::apify::ApifyClient,
    RemoteTranscriber, VideoProcessorBuilder,
};

/// Runs the widget against the real services.
///
/// A missing API credential or an invalid configuration is reported before any
/// network call. A missing transcription service only disables transcription.
#[tracing::instrument(skip_all)]
pub async fn execute(
    config: WidgetConfig,
    env: &Environment,
    settings: &ServiceSettings,
) -> WidgetOutput {
    let Some(token) = env.api_token.as_deref() else {
        tracing::error!("{} is not set", Environment::API_TOKEN_VAR);
        return WidgetOutput::failure(Error::MissingCredential(Environment::API_TOKEN_VAR));
    };

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Rejected widget configuration");
        return WidgetOutput::failure(e);
    }

    if config.transcribe_videos && env.transcription_service_url.is_none() {
        tracing::warn!(
            "{} is not set, transcription is disabled for this run",
            Environment::TRANSCRIPTION_URL_VAR
        );
    }

    let apify = ApifyClient::new(token)
        .with_base_url(&settings.apify_base_url)
        .with_actors(&settings.channel_scraper_actor, &settings.download_actor);

    let transcriber = RemoteTranscriber::new(env.transcription_service_url.clone())
        .with_poll_policy(settings.poll_policy);

    let processor = VideoProcessorBuilder::new(config)
        .channel_source(apify.clone())
        .download_resolver(apify.clone())
        .freshness_checker(HttpFreshnessChecker::new(settings.freshness_timeout))
        .store_provider(apify.key_value_stores())
        .transcriber(transcriber)
        .link_store_name(&settings.link_store_name)
        .build();

    processor.run().await
}
