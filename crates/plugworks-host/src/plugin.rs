//! Plugin trait, export bundles, and the plugin registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use plugworks_core::AppResult;

use crate::phase::Phase;
use crate::registry::PhaseHandler;
use crate::services::HostServices;

/// Metadata about an installed plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
}

/// Activation state of an installed plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginState {
    /// Installed but never activated.
    Installed,
    /// Activated; its phase handlers run on every request.
    Active,
    /// Deactivated after having been active. Options it wrote remain.
    Inactive,
}

impl PluginState {
    /// Returns the string name of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for PluginState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait that all plugins must implement.
///
/// Activation and deactivation are edge-triggered operations that run once
/// per transition, outside the request phase cycle. Per-request behavior
/// lives in the phase handlers a plugin exports.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once when the plugin transitions to active.
    async fn activate(&self, services: &HostServices) -> AppResult<()>;

    /// Called once when the plugin transitions to inactive.
    async fn deactivate(&self, services: &HostServices) -> AppResult<()>;
}

/// A bundle describing a fully assembled plugin ready for installation.
#[derive(Debug)]
pub struct PluginExport {
    /// The plugin instance.
    pub plugin: Arc<dyn Plugin>,
    /// Phase handlers to register while the plugin is active.
    pub handlers: Vec<(Phase, Arc<dyn PhaseHandler>)>,
}

impl PluginExport {
    /// Creates a new plugin export with no handlers.
    pub fn new(plugin: Arc<dyn Plugin>) -> Self {
        Self {
            plugin,
            handlers: Vec::new(),
        }
    }

    /// Adds a phase handler.
    pub fn with_handler(mut self, phase: Phase, handler: Arc<dyn PhaseHandler>) -> Self {
        self.handlers.push((phase, handler));
        self
    }
}

/// Builder for constructing plugin exports incrementally.
#[derive(Debug)]
pub struct PluginExportBuilder {
    /// The plugin.
    plugin: Arc<dyn Plugin>,
    /// Accumulated handlers.
    handlers: Vec<(Phase, Arc<dyn PhaseHandler>)>,
}

impl PluginExportBuilder {
    /// Creates a new builder with the given plugin.
    pub fn new(plugin: Arc<dyn Plugin>) -> Self {
        Self {
            plugin,
            handlers: Vec::new(),
        }
    }

    /// Registers a handler for a phase.
    pub fn on(mut self, phase: Phase, handler: Arc<dyn PhaseHandler>) -> Self {
        self.handlers.push((phase, handler));
        self
    }

    /// Builds the final export.
    pub fn build(self) -> PluginExport {
        PluginExport {
            plugin: self.plugin,
            handlers: self.handlers,
        }
    }
}

/// Record of one installed plugin.
#[derive(Debug)]
struct PluginRecord {
    /// The plugin instance.
    plugin: Arc<dyn Plugin>,
    /// Cached metadata.
    info: PluginInfo,
    /// Current activation state.
    state: PluginState,
    /// Handlers to (re-)register on activation.
    handlers: Vec<(Phase, Arc<dyn PhaseHandler>)>,
}

/// Registry of all installed plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin ID → record.
    plugins: RwLock<HashMap<String, PluginRecord>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a plugin from its export bundle.
    ///
    /// Installing a plugin whose ID is already present returns the existing
    /// instance unchanged; the new export is discarded. The boolean is true
    /// only for a first-time install.
    pub async fn install(&self, export: PluginExport) -> (Arc<dyn Plugin>, bool) {
        let info = export.plugin.info();
        let id = info.id.clone();

        let mut plugins = self.plugins.write().await;

        if let Some(existing) = plugins.get(&id) {
            warn!(plugin_id = %id, "Plugin already installed, returning existing instance");
            return (existing.plugin.clone(), false);
        }

        info!(plugin_id = %id, name = %info.name, version = %info.version, "Installing plugin");

        let plugin = export.plugin.clone();
        plugins.insert(
            id,
            PluginRecord {
                plugin: export.plugin,
                info,
                state: PluginState::Installed,
                handlers: export.handlers,
            },
        );

        (plugin, true)
    }

    /// Gets a plugin by ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|r| r.plugin.clone())
    }

    /// Returns the handlers a plugin exported.
    pub async fn handlers_of(&self, plugin_id: &str) -> Vec<(Phase, Arc<dyn PhaseHandler>)> {
        let plugins = self.plugins.read().await;
        plugins
            .get(plugin_id)
            .map(|r| r.handlers.clone())
            .unwrap_or_default()
    }

    /// Returns the activation state of a plugin.
    pub async fn state(&self, plugin_id: &str) -> Option<PluginState> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|r| r.state)
    }

    /// Updates the activation state of a plugin. Returns false if the
    /// plugin is not installed.
    pub async fn set_state(&self, plugin_id: &str, state: PluginState) -> bool {
        let mut plugins = self.plugins.write().await;
        match plugins.get_mut(plugin_id) {
            Some(record) => {
                record.state = state;
                true
            }
            None => false,
        }
    }

    /// Returns whether a plugin is currently active.
    pub async fn is_active(&self, plugin_id: &str) -> bool {
        self.state(plugin_id).await == Some(PluginState::Active)
    }

    /// Checks whether a plugin is installed.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.contains_key(plugin_id)
    }

    /// Lists metadata for all installed plugins, sorted by ID.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<PluginInfo> = plugins.values().map(|r| r.info.clone()).collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Returns the number of installed plugins.
    pub async fn count(&self) -> usize {
        let plugins = self.plugins.read().await;
        plugins.len()
    }
}
