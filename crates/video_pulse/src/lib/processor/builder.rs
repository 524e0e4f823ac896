use link_store::StoreProvider;

use crate::{
    config::{WidgetConfig, DEFAULT_LINK_STORE_NAME},
    download::FreshnessChecker,
    yt::{ChannelSource, DownloadResolver},
    Transcriber, VideoProcessor,
};

pub struct VideoProcessorBuilder<C = (), R = (), F = (), P = (), T = ()> {
    config: WidgetConfig,
    link_store_name: String,
    channel_source: C,
    download_resolver: R,
    freshness_checker: F,
    store_provider: P,
    transcriber: T,
}

impl VideoProcessorBuilder {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            link_store_name: DEFAULT_LINK_STORE_NAME.into(),
            channel_source: (),
            download_resolver: (),
            freshness_checker: (),
            store_provider: (),
            transcriber: (),
        }
    }
}

impl<C, R, F, P, T> VideoProcessorBuilder<C, R, F, P, T> {
    pub fn channel_source<C2: ChannelSource + Send + Sync + 'static>(
        self,
        channel_source: C2,
    ) -> VideoProcessorBuilder<C2, R, F, P, T> {
        VideoProcessorBuilder {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source,
            download_resolver: self.download_resolver,
            freshness_checker: self.freshness_checker,
            store_provider: self.store_provider,
            transcriber: self.transcriber,
        }
    }

    pub fn download_resolver<R2: DownloadResolver + Send + Sync + 'static>(
        self,
        download_resolver: R2,
    ) -> VideoProcessorBuilder<C, R2, F, P, T> {
        VideoProcessorBuilder {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source: self.channel_source,
            download_resolver,
            freshness_checker: self.freshness_checker,
            store_provider: self.store_provider,
            transcriber: self.transcriber,
        }
    }

    pub fn freshness_checker<F2: FreshnessChecker + Send + Sync + 'static>(
        self,
        freshness_checker: F2,
    ) -> VideoProcessorBuilder<C, R, F2, P, T> {
        VideoProcessorBuilder {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source: self.channel_source,
            download_resolver: self.download_resolver,
            freshness_checker,
            store_provider: self.store_provider,
            transcriber: self.transcriber,
        }
    }

    pub fn store_provider<P2: StoreProvider + Send + Sync + 'static>(
        self,
        store_provider: P2,
    ) -> VideoProcessorBuilder<C, R, F, P2, T> {
        VideoProcessorBuilder {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source: self.channel_source,
            download_resolver: self.download_resolver,
            freshness_checker: self.freshness_checker,
            store_provider,
            transcriber: self.transcriber,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> VideoProcessorBuilder<C, R, F, P, T2> {
        VideoProcessorBuilder {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source: self.channel_source,
            download_resolver: self.download_resolver,
            freshness_checker: self.freshness_checker,
            store_provider: self.store_provider,
            transcriber,
        }
    }

    pub fn link_store_name(mut self, name: impl Into<String>) -> Self {
        self.link_store_name = name.into();
        self
    }
}

impl<C, R, F, P, T> VideoProcessorBuilder<C, R, F, P, T>
where
    C: ChannelSource + Send + Sync + 'static,
    R: DownloadResolver + Send + Sync + 'static,
    F: FreshnessChecker + Send + Sync + 'static,
    P: StoreProvider + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
{
    pub fn build(self) -> VideoProcessor<C, R, F, P, T> {
        VideoProcessor {
            config: self.config,
            link_store_name: self.link_store_name,
            channel_source: self.channel_source,
            download_resolver: self.download_resolver,
            freshness_checker: self.freshness_checker,
            store_provider: self.store_provider,
            transcriber: self.transcriber,
        }
    }
}
