use std::future::Future;

use serde_json::Value;

pub mod apify;

/// A remote key-value store addressed by record key
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the record does not exist
    fn get_record(&self, key: &str) -> impl Future<Output = anyhow::Result<Option<Value>>> + Send;

    fn set_record(
        &self,
        key: &str,
        value: &Value,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: KeyValueStore + Send + Sync> KeyValueStore for &T {
    async fn get_record(&self, key: &str) -> anyhow::Result<Option<Value>> {
        (**self).get_record(key).await
    }

    async fn set_record(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        (**self).set_record(key, value).await
    }
}

/// Opens (creating when needed) a named key-value store
pub trait StoreProvider {
    type Store: KeyValueStore + Send + Sync;

    fn get_or_create(&self, name: &str) -> impl Future<Output = anyhow::Result<Self::Store>> + Send;
}
