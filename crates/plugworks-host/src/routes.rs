//! Cached routing table derived from registered content types.
//!
//! The table is rebuilt lazily: content registration and `flush` mark it
//! stale, and the next `rules` call rebuilds it from the content registry.
//! Plugins flush on activation and deactivation so the cache never serves
//! rules for content that is no longer registered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::content::ContentRegistry;

/// A single routing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Match pattern, e.g. `event/{slug}`.
    pub pattern: String,
    /// Dispatch target, e.g. `post_type:event`.
    pub target: String,
    /// Plugin whose registration produced the rule.
    pub source: String,
}

impl RouteRule {
    /// Creates a new rule.
    pub fn new(pattern: &str, target: &str, source: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            target: target.to_string(),
            source: source.to_string(),
        }
    }
}

#[derive(Debug)]
struct RouteTableInner {
    cache: Vec<RouteRule>,
    stale: bool,
    generation: u64,
    last_flush: Option<DateTime<Utc>>,
}

impl Default for RouteTableInner {
    fn default() -> Self {
        Self {
            cache: Vec::new(),
            // Nothing has been built yet.
            stale: true,
            generation: 0,
            last_flush: None,
        }
    }
}

/// The site routing table.
#[derive(Debug, Default)]
pub struct RouteTable {
    inner: RwLock<RouteTableInner>,
}

impl RouteTable {
    /// Creates an empty, stale table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards the cached rules and records the flush time. The next
    /// `rules` call rebuilds the cache from current registrations.
    pub async fn flush(&self) {
        let mut inner = self.inner.write().await;
        inner.stale = true;
        inner.last_flush = Some(Utc::now());
        info!("Routing table flushed");
    }

    /// Marks the cache stale without touching the flush time. Called by the
    /// content registry when a registration changes.
    pub(crate) async fn mark_stale(&self) {
        let mut inner = self.inner.write().await;
        if !inner.stale {
            inner.stale = true;
            debug!("Routing table marked stale");
        }
    }

    /// Returns the routing rules, rebuilding the cache from the content
    /// registry when stale.
    pub async fn rules(&self, content: &ContentRegistry) -> Vec<RouteRule> {
        if self.inner.read().await.stale {
            let rebuilt = Self::derive_rules(content).await;
            let mut inner = self.inner.write().await;
            // A concurrent call may have rebuilt already.
            if inner.stale {
                inner.cache = rebuilt;
                inner.stale = false;
                inner.generation += 1;
                debug!(
                    generation = inner.generation,
                    rules = inner.cache.len(),
                    "Routing table rebuilt"
                );
            }
        }
        self.inner.read().await.cache.clone()
    }

    /// Returns whether the cache must be rebuilt before use.
    pub async fn is_stale(&self) -> bool {
        self.inner.read().await.stale
    }

    /// Returns the rebuild generation counter.
    pub async fn generation(&self) -> u64 {
        self.inner.read().await.generation
    }

    /// Returns the time of the last flush, if any.
    pub async fn last_flush(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.last_flush
    }

    async fn derive_rules(content: &ContentRegistry) -> Vec<RouteRule> {
        let mut rules = Vec::new();
        for post_type in content.post_types().await {
            if !post_type.public {
                continue;
            }
            rules.push(RouteRule::new(
                &format!("{}/{{slug}}", post_type.key),
                &format!("post_type:{}", post_type.key),
                &post_type.source,
            ));
        }
        for taxonomy in content.taxonomies().await {
            rules.push(RouteRule::new(
                &format!("{}/{{term}}", taxonomy.key),
                &format!("taxonomy:{}", taxonomy.key),
                &taxonomy.source,
            ));
        }
        rules
    }
}
