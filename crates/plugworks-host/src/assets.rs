//! Request-scoped asset queue.
//!
//! Handlers enqueue stylesheets and scripts by handle during a request; the
//! queue deduplicates on handle so repeated enqueues of the same asset are
//! no-ops. The host clears the queue at the start of every request.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Kind of enqueued asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// A stylesheet.
    Style,
    /// A script.
    Script,
}

/// A single enqueued asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    /// Unique handle within the request.
    pub handle: String,
    /// Source path or URL.
    pub src: String,
    /// Version string appended for cache busting.
    pub version: String,
    /// Style or script.
    pub kind: AssetKind,
}

#[derive(Debug, Default)]
struct AssetQueueInner {
    styles: Vec<Asset>,
    scripts: Vec<Asset>,
}

/// Queue of assets enqueued during the current request.
#[derive(Debug, Default)]
pub struct AssetQueue {
    inner: RwLock<AssetQueueInner>,
}

impl AssetQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a stylesheet. Returns false if the handle is already queued.
    pub async fn enqueue_style(&self, handle: &str, src: &str, version: &str) -> bool {
        self.enqueue(AssetKind::Style, handle, src, version).await
    }

    /// Enqueues a script. Returns false if the handle is already queued.
    pub async fn enqueue_script(&self, handle: &str, src: &str, version: &str) -> bool {
        self.enqueue(AssetKind::Script, handle, src, version).await
    }

    async fn enqueue(&self, kind: AssetKind, handle: &str, src: &str, version: &str) -> bool {
        let mut inner = self.inner.write().await;
        let list = match kind {
            AssetKind::Style => &mut inner.styles,
            AssetKind::Script => &mut inner.scripts,
        };

        if list.iter().any(|a| a.handle == handle) {
            debug!(handle = %handle, "Asset already enqueued, skipping");
            return false;
        }

        list.push(Asset {
            handle: handle.to_string(),
            src: src.to_string(),
            version: version.to_string(),
            kind,
        });
        true
    }

    /// Returns whether a handle is queued as either kind.
    pub async fn is_enqueued(&self, handle: &str) -> bool {
        let inner = self.inner.read().await;
        inner.styles.iter().any(|a| a.handle == handle)
            || inner.scripts.iter().any(|a| a.handle == handle)
    }

    /// Returns the queued stylesheets in enqueue order.
    pub async fn styles(&self) -> Vec<Asset> {
        let inner = self.inner.read().await;
        inner.styles.clone()
    }

    /// Returns the queued scripts in enqueue order.
    pub async fn scripts(&self) -> Vec<Asset> {
        let inner = self.inner.read().await;
        inner.scripts.clone()
    }

    /// Returns the total number of queued assets.
    pub async fn len(&self) -> usize {
        let inner = self.inner.read().await;
        inner.styles.len() + inner.scripts.len()
    }

    /// Returns whether the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Empties the queue. Called by the host at the start of each request.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.styles.clear();
        inner.scripts.clear();
    }
}
