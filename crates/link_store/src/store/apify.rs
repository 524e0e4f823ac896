use anyhow::Context;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::store::{KeyValueStore, StoreProvider};

/// Entry point to the Apify key-value store API
#[derive(Debug, Clone)]
pub struct ApifyKeyValueStores {
    client: Client,
    token: String,
    base_url: String,
}

/// Handle to a single Apify key-value store, reused for every record access in a run
#[derive(Debug, Clone)]
pub struct ApifyKeyValueStore {
    client: Client,
    token: String,
    base_url: String,
    store_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct StoreInfo {
    id: String,
}

impl ApifyKeyValueStores {
    pub const DEFAULT_BASE_URL: &str = "https://api.apify.com/v2";

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl StoreProvider for ApifyKeyValueStores {
    type Store = ApifyKeyValueStore;

    #[tracing::instrument(skip(self))]
    async fn get_or_create(&self, name: &str) -> anyhow::Result<ApifyKeyValueStore> {
        let resp = self
            .client
            .post(format!("{}/key-value-stores", self.base_url))
            .query(&[("name", name)])
            .bearer_auth(&self.token)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .context("Failed to reach the key-value store API")?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Key-value store API returned {status}: {message}");
        }

        let store = resp
            .json::<ApiEnvelope<StoreInfo>>()
            .await
            .context("Unexpected key-value store API response")?
            .data;

        tracing::debug!(store_id = %store.id, "Opened key-value store");

        Ok(ApifyKeyValueStore {
            client: self.client.clone(),
            token: self.token.clone(),
            base_url: self.base_url.clone(),
            store_id: store.id,
        })
    }
}

impl ApifyKeyValueStore {
    fn record_url(&self, key: &str) -> String {
        format!(
            "{}/key-value-stores/{}/records/{}",
            self.base_url, self.store_id, key
        )
    }
}

impl KeyValueStore for ApifyKeyValueStore {
    async fn get_record(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let resp = self
            .client
            .get(self.record_url(key))
            .bearer_auth(&self.token)
            .send()
            .await
            .context("Failed to fetch key-value store record")?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Fetching record '{key}' returned {status}: {message}");
        }

        let value = resp
            .json::<Value>()
            .await
            .with_context(|| format!("Record '{key}' is not valid JSON"))?;

        Ok(Some(value))
    }

    async fn set_record(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        let resp = self
            .client
            .put(self.record_url(key))
            .bearer_auth(&self.token)
            .json(value)
            .send()
            .await
            .context("Failed to store key-value store record")?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            anyhow::bail!("Storing record '{key}' returned {status}: {message}");
        }

        Ok(())
    }
}
