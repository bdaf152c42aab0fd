//! Phase registry — plugins register handlers by phase with priority ordering.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use plugworks_core::AppResult;

use crate::phase::Phase;
use crate::request::RequestContext;
use crate::services::HostServices;

/// Trait for phase handler implementations.
#[async_trait]
pub trait PhaseHandler: Send + Sync + std::fmt::Debug {
    /// Runs the handler for one request.
    async fn run(&self, services: &HostServices, request: &RequestContext) -> AppResult<()>;

    /// Returns the plugin ID owning this handler.
    fn plugin_id(&self) -> &str;

    /// Returns the handler name, used in logs and failure reports.
    fn name(&self) -> &str;

    /// Returns the priority (lower = runs first).
    fn priority(&self) -> i32 {
        10
    }
}

/// Entry in the phase registry.
#[derive(Debug)]
struct PhaseEntry {
    /// The handler.
    handler: Arc<dyn PhaseHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Plugin that registered this handler.
    plugin_id: String,
}

/// Registry of phase handlers organized by phase.
///
/// Handlers for a phase run sorted by priority; registration order breaks
/// ties (the sort is stable).
#[derive(Debug)]
pub struct PhaseRegistry {
    /// Phase → sorted list of handlers.
    handlers: RwLock<HashMap<Phase, Vec<PhaseEntry>>>,
}

impl PhaseRegistry {
    /// Creates a new empty phase registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a handler for a specific phase.
    pub async fn register(&self, phase: Phase, handler: Arc<dyn PhaseHandler>) {
        let plugin_id = handler.plugin_id().to_string();
        let priority = handler.priority();

        let mut handlers = self.handlers.write().await;
        let entries = handlers.entry(phase).or_default();

        entries.push(PhaseEntry {
            handler,
            priority,
            plugin_id: plugin_id.clone(),
        });

        // Sort by priority (lower first)
        entries.sort_by_key(|e| e.priority);

        info!(
            phase = %phase,
            plugin_id = %plugin_id,
            priority = priority,
            "Phase handler registered"
        );
    }

    /// Unregisters all handlers for a specific plugin.
    pub async fn unregister_plugin(&self, plugin_id: &str) {
        let mut handlers = self.handlers.write().await;

        for entries in handlers.values_mut() {
            entries.retain(|e| e.plugin_id != plugin_id);
        }

        // Remove empty phase entries
        handlers.retain(|_, entries| !entries.is_empty());

        info!(plugin_id = %plugin_id, "All phase handlers unregistered for plugin");
    }

    /// Returns all handlers for a specific phase, sorted by priority.
    pub async fn get_handlers(&self, phase: Phase) -> Vec<Arc<dyn PhaseHandler>> {
        let handlers = self.handlers.read().await;
        handlers
            .get(&phase)
            .map(|entries| entries.iter().map(|e| e.handler.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns whether any handlers are registered for a phase.
    pub async fn has_handlers(&self, phase: Phase) -> bool {
        let handlers = self.handlers.read().await;
        handlers
            .get(&phase)
            .map(|entries| !entries.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of handlers registered for a phase.
    pub async fn handler_count(&self, phase: Phase) -> usize {
        let handlers = self.handlers.read().await;
        handlers
            .get(&phase)
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Returns all phases with at least one handler.
    pub async fn registered_phases(&self) -> Vec<Phase> {
        let handlers = self.handlers.read().await;
        handlers.keys().copied().collect()
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        Self::new()
    }
}
