use std::fmt::{Debug, Display};

use serde_json::{Map, Value};

use crate::store::KeyValueStore;

/// Resolution-scoped cache of `video_url -> download_url` links.
///
/// Every resolution maps to a single record holding a JSON object of links.
/// Updates are a plain read-modify-write of that record: two runs writing the
/// same resolution at once can drop one another's update (last write wins).
#[derive(Debug, Clone)]
pub struct LinkCache<S> {
    store: S,
}

impl<S: KeyValueStore> LinkCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record key holding the link map for `resolution`, e.g. `download_links_720p`
    pub fn record_key(resolution: impl Display) -> String {
        format!("download_links_{resolution}p")
    }

    /// Looks up the cached download link of `video_url`.
    ///
    /// Store failures are logged and reported as a miss.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, video_url: &str, resolution: impl Display + Debug) -> Option<String> {
        let links = self
            .load_links(&Self::record_key(&resolution))
            .await
            .inspect_err(|e| {
                tracing::warn!(error = ?e, "Failed to read link cache, treating as miss")
            })
            .ok()?;

        let link = links.get(video_url).and_then(Value::as_str).map(str::to_owned);
        match link {
            Some(_) => tracing::debug!("Link cache hit"),
            None => tracing::debug!("Link cache miss"),
        }
        link
    }

    /// Stores `download_url` as the link of `video_url`, keeping every other
    /// entry of the resolution's map.
    ///
    /// Returns `false` when the store could not be read or written.
    #[tracing::instrument(skip(self))]
    pub async fn put(
        &self,
        video_url: &str,
        download_url: &str,
        resolution: impl Display + Debug,
    ) -> bool {
        let key = Self::record_key(&resolution);

        let mut links = match self.load_links(&key).await {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to read link cache before update");
                return false;
            }
        };
        links.insert(video_url.to_owned(), Value::String(download_url.to_owned()));

        match self.store.set_record(&key, &Value::Object(links)).await {
            Ok(()) => {
                tracing::debug!("Link cached");
                true
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to write link cache");
                false
            }
        }
    }

    async fn load_links(&self, key: &str) -> anyhow::Result<Map<String, Value>> {
        let links = match self.store.get_record(key).await? {
            Some(Value::Object(links)) => links,
            Some(other) => {
                tracing::warn!(key, value = %other, "Link cache record is not a map, ignoring it");
                Map::new()
            }
            None => Map::new(),
        };
        Ok(links)
    }
}
