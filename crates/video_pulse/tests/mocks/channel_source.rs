use std::sync::{Arc, Mutex};
use video_pulse::{
    yt::{ChannelRequest, ChannelSource},
    VideoRecord,
};

#[derive(Clone, Default)]
pub struct MockChannelSource {
    pub videos: Vec<VideoRecord>,
    pub calls: Arc<Mutex<Vec<ChannelRequest>>>,
    pub fail_with: Option<String>,
}

impl MockChannelSource {
    pub fn new(videos: Vec<VideoRecord>) -> Self {
        Self {
            videos,
            ..Default::default()
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl ChannelSource for MockChannelSource {
    async fn fetch_channel_videos(
        &self,
        request: &ChannelRequest,
    ) -> anyhow::Result<Vec<VideoRecord>> {
        self.calls.lock().unwrap().push(request.clone());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.videos.clone())
    }
}
