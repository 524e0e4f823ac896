use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use video_pulse::yt::{DownloadResolver, ResolveRequest};

/// Link the mock resolver hands out for `video_url`
pub fn fresh_link(video_url: &str) -> String {
    format!("https://cdn.example.com/fresh?src={video_url}")
}

#[derive(Clone, Default)]
pub struct MockDownloadResolver {
    /// `(video_url, resolution, residential proxy)` of every call
    pub calls: Arc<Mutex<Vec<(String, u16, bool)>>>,
    /// Per-video failure messages
    pub failures: HashMap<String, String>,
    pub returns_nothing: bool,
}

impl MockDownloadResolver {
    pub fn returning_nothing() -> Self {
        Self {
            returns_nothing: true,
            ..Default::default()
        }
    }

    pub fn failing_for(video_url: &str, msg: &str) -> Self {
        Self {
            failures: HashMap::from([(video_url.to_string(), msg.to_string())]),
            ..Default::default()
        }
    }
}

impl DownloadResolver for MockDownloadResolver {
    async fn resolve(&self, request: &ResolveRequest<'_>) -> anyhow::Result<Option<String>> {
        self.calls.lock().unwrap().push((
            request.video_url.to_string(),
            request.resolution.height(),
            request.proxy.use_residential,
        ));
        if let Some(msg) = self.failures.get(request.video_url) {
            return Err(anyhow::anyhow!("{}", msg));
        }
        if self.returns_nothing {
            return Ok(None);
        }
        Ok(Some(fresh_link(request.video_url)))
    }
}
