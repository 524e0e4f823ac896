use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use video_pulse::transcription::Sleeper;

/// Records requested sleeps without waiting
#[derive(Clone, Default)]
pub struct RecordingSleeper {
    pub sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
