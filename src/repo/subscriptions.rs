use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Subscription;

/// Subscription store trait, whole-collection load/save semantics.
/// NOTE: Intended to facilitate easier testing/mocking
/// TODO: Swap async-trait for std async traits when those become stable
/// https://github.com/orgs/rust-lang/projects/28/views/2?pane=issue&itemId=21990165
#[async_trait::async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Load a snapshot of every stored record
    async fn load(&self) -> Result<Vec<Subscription>>;

    /// Replace the stored collection.
    /// A failed save must leave the previously persisted state intact.
    async fn save(&self, subscriptions: &[Subscription]) -> Result<()>;
}

/// Flat-file JSON store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

/// On-disk layout: a single object holding the whole collection
#[derive(Debug, Serialize)]
struct StoreFile<'a> {
    subscriptions: &'a [Subscription],
}

/// Loose counterpart of [`StoreFile`]: records are kept as raw values so a
/// single malformed record can be skipped instead of failing the whole load.
#[derive(Debug, Deserialize)]
struct RawStoreFile {
    #[serde(default)]
    subscriptions: Vec<serde_json::Value>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl SubscriptionStore for JsonFileStore {
    #[tracing::instrument(name = "Load subscriptions", skip(self))]
    async fn load(&self) -> Result<Vec<Subscription>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            // A store that does not exist yet is an empty collection
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let raw: RawStoreFile = serde_json::from_slice(&bytes)?;

        let mut subscriptions = Vec::with_capacity(raw.subscriptions.len());
        for value in raw.subscriptions {
            match serde_json::from_value::<Subscription>(value) {
                Ok(sub) => subscriptions.push(sub),
                Err(error) => {
                    // One malformed record must not take down the pass
                    tracing::warn!(
                        error.cause_chain = ?error,
                        "Skipping malformed subscription record"
                    );
                }
            }
        }
        Ok(subscriptions)
    }

    #[tracing::instrument(name = "Save subscriptions", skip(self, subscriptions))]
    async fn save(&self, subscriptions: &[Subscription]) -> Result<()> {
        let file = StoreFile { subscriptions };
        let json = serde_json::to_vec_pretty(&file)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        // Write to a sibling temp file first, then rename into place, so an
        // interrupted save cannot clobber the previous state.
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!("Saved {} subscription(s)", subscriptions.len());
        Ok(())
    }
}
