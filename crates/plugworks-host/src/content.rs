//! Content type registry.
//!
//! Plugins register post types, taxonomies, and meta boxes during the init
//! phase of every request. Registration is an idempotent upsert so repeated
//! registration of the same definition across requests is harmless. Post
//! type and taxonomy changes mark the routing table stale; meta boxes do
//! not affect routing.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::routes::RouteTable;

/// A custom post type definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostType {
    /// Registry key, e.g. `event`.
    pub key: String,
    /// Singular label.
    pub singular: String,
    /// Plural label.
    pub plural: String,
    /// Whether the type is publicly queryable.
    pub public: bool,
    /// Plugin that registered the type.
    pub source: String,
}

/// A taxonomy definition attached to a post type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Registry key, e.g. `event-category`.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Post type key this taxonomy attaches to.
    pub object_type: String,
    /// Plugin that registered the taxonomy.
    pub source: String,
}

/// A meta box definition shown on an edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaBox {
    /// Registry key, e.g. `event-details`.
    pub id: String,
    /// Box title.
    pub title: String,
    /// Post type key whose edit screen shows the box.
    pub post_type: String,
    /// Plugin that registered the box.
    pub source: String,
}

#[derive(Debug, Default)]
struct ContentRegistryInner {
    post_types: BTreeMap<String, PostType>,
    taxonomies: BTreeMap<String, Taxonomy>,
    meta_boxes: BTreeMap<String, MetaBox>,
}

/// Registry of content definitions contributed by plugins.
#[derive(Debug)]
pub struct ContentRegistry {
    inner: RwLock<ContentRegistryInner>,
    routes: Arc<RouteTable>,
}

impl ContentRegistry {
    /// Creates an empty registry wired to the routing table it invalidates.
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self {
            inner: RwLock::new(ContentRegistryInner::default()),
            routes,
        }
    }

    /// Upserts a post type. Returns true if the registry changed.
    pub async fn register_post_type(&self, post_type: PostType) -> bool {
        let changed = {
            let mut inner = self.inner.write().await;
            match inner.post_types.get(&post_type.key) {
                Some(existing) if *existing == post_type => {
                    debug!(key = %post_type.key, "Post type unchanged, skipping");
                    false
                }
                _ => {
                    debug!(key = %post_type.key, source = %post_type.source, "Post type registered");
                    inner.post_types.insert(post_type.key.clone(), post_type);
                    true
                }
            }
        };
        if changed {
            self.routes.mark_stale().await;
        }
        changed
    }

    /// Upserts a taxonomy. Returns true if the registry changed.
    pub async fn register_taxonomy(&self, taxonomy: Taxonomy) -> bool {
        let changed = {
            let mut inner = self.inner.write().await;
            match inner.taxonomies.get(&taxonomy.key) {
                Some(existing) if *existing == taxonomy => {
                    debug!(key = %taxonomy.key, "Taxonomy unchanged, skipping");
                    false
                }
                _ => {
                    debug!(key = %taxonomy.key, source = %taxonomy.source, "Taxonomy registered");
                    inner.taxonomies.insert(taxonomy.key.clone(), taxonomy);
                    true
                }
            }
        };
        if changed {
            self.routes.mark_stale().await;
        }
        changed
    }

    /// Upserts a meta box. Returns true if the registry changed.
    pub async fn register_meta_box(&self, meta_box: MetaBox) -> bool {
        let mut inner = self.inner.write().await;
        match inner.meta_boxes.get(&meta_box.id) {
            Some(existing) if *existing == meta_box => {
                debug!(id = %meta_box.id, "Meta box unchanged, skipping");
                false
            }
            _ => {
                debug!(id = %meta_box.id, source = %meta_box.source, "Meta box registered");
                inner.meta_boxes.insert(meta_box.id.clone(), meta_box);
                true
            }
        }
    }

    /// Looks up a post type by key.
    pub async fn post_type(&self, key: &str) -> Option<PostType> {
        self.inner.read().await.post_types.get(key).cloned()
    }

    /// Looks up a taxonomy by key.
    pub async fn taxonomy(&self, key: &str) -> Option<Taxonomy> {
        self.inner.read().await.taxonomies.get(key).cloned()
    }

    /// Looks up a meta box by id.
    pub async fn meta_box(&self, id: &str) -> Option<MetaBox> {
        self.inner.read().await.meta_boxes.get(id).cloned()
    }

    /// Returns all post types, sorted by key.
    pub async fn post_types(&self) -> Vec<PostType> {
        self.inner.read().await.post_types.values().cloned().collect()
    }

    /// Returns all taxonomies, sorted by key.
    pub async fn taxonomies(&self) -> Vec<Taxonomy> {
        self.inner.read().await.taxonomies.values().cloned().collect()
    }

    /// Returns all meta boxes, sorted by id.
    pub async fn meta_boxes(&self) -> Vec<MetaBox> {
        self.inner.read().await.meta_boxes.values().cloned().collect()
    }

    /// Removes every definition registered by the given plugin. Returns the
    /// number of definitions removed.
    pub async fn remove_source(&self, source: &str) -> usize {
        let removed = {
            let mut inner = self.inner.write().await;
            let before =
                inner.post_types.len() + inner.taxonomies.len() + inner.meta_boxes.len();
            inner.post_types.retain(|_, v| v.source != source);
            inner.taxonomies.retain(|_, v| v.source != source);
            inner.meta_boxes.retain(|_, v| v.source != source);
            let after = inner.post_types.len() + inner.taxonomies.len() + inner.meta_boxes.len();
            before - after
        };
        if removed > 0 {
            debug!(source = %source, removed = removed, "Content definitions removed");
            self.routes.mark_stale().await;
        }
        removed
    }
}
