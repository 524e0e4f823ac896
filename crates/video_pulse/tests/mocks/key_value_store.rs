use link_store::{KeyValueStore, StoreProvider};
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

#[derive(Clone, Default)]
pub struct MockKeyValueStore {
    pub records: Arc<Mutex<HashMap<String, Value>>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MockKeyValueStore {
    /// A store already holding `video_url -> download_url` for `resolution`
    pub fn with_link(resolution: u16, video_url: &str, download_url: &str) -> Self {
        let store = Self::default();
        store.records.lock().unwrap().insert(
            format!("download_links_{resolution}p"),
            json!({ video_url: download_url }),
        );
        store
    }

    pub fn link(&self, resolution: u16, video_url: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .get(&format!("download_links_{resolution}p"))
            .and_then(|links| links.get(video_url))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }
}

impl KeyValueStore for MockKeyValueStore {
    async fn get_record(&self, key: &str) -> anyhow::Result<Option<Value>> {
        if self.fail_reads {
            anyhow::bail!("key-value store unreachable");
        }
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn set_record(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        if self.fail_writes {
            anyhow::bail!("key-value store rejected the write");
        }
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockStoreProvider {
    pub store: MockKeyValueStore,
    pub opened: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockStoreProvider {
    pub fn new(store: MockKeyValueStore) -> Self {
        Self {
            store,
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

impl StoreProvider for MockStoreProvider {
    type Store = MockKeyValueStore;

    async fn get_or_create(&self, name: &str) -> anyhow::Result<MockKeyValueStore> {
        self.opened.lock().unwrap().push(name.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.store.clone())
    }
}
