use std::sync::{Arc, Mutex};
use video_pulse::download::FreshnessChecker;

#[derive(Clone)]
pub struct MockFreshnessChecker {
    pub valid: bool,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFreshnessChecker {
    pub fn valid() -> Self {
        Self {
            valid: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expired() -> Self {
        Self {
            valid: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FreshnessChecker for MockFreshnessChecker {
    async fn is_valid(&self, url: &str) -> bool {
        self.calls.lock().unwrap().push(url.to_string());
        self.valid
    }
}
