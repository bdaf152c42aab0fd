//! Host — lifecycle management and request dispatch for all plugins.

use std::sync::Arc;

use tracing::{debug, info};

use plugworks_core::config::HostConfig;
use plugworks_core::{AppError, AppResult, OptionStore};

use crate::dispatcher::PhaseDispatcher;
use crate::options::MemoryOptionStore;
use crate::phase::RequestKind;
use crate::plugin::{Plugin, PluginExport, PluginRegistry, PluginState};
use crate::registry::PhaseRegistry;
use crate::request::{RequestContext, RequestReport};
use crate::services::HostServices;
use crate::users::UserContext;

/// Builder for constructing a [`Host`].
#[derive(Debug)]
pub struct HostBuilder {
    config: HostConfig,
    options: Option<Arc<dyn OptionStore>>,
}

impl HostBuilder {
    /// Creates a builder around the given configuration.
    pub fn new(config: HostConfig) -> Self {
        Self {
            config,
            options: None,
        }
    }

    /// Uses the given option store instead of a fresh in-memory one.
    pub fn with_options(mut self, options: Arc<dyn OptionStore>) -> Self {
        self.options = Some(options);
        self
    }

    /// Builds the host.
    pub fn build(self) -> Host {
        let options = self
            .options
            .unwrap_or_else(|| Arc::new(MemoryOptionStore::new()));
        let services = Arc::new(HostServices::new(self.config, options));
        let phases = Arc::new(PhaseRegistry::new());
        let dispatcher = PhaseDispatcher::new(phases.clone());

        Host {
            services,
            plugins: PluginRegistry::new(),
            phases,
            dispatcher,
        }
    }
}

/// The plugin host: owns the site services, the installed plugins, and the
/// phase machinery that drives requests.
#[derive(Debug)]
pub struct Host {
    /// Shared site services.
    services: Arc<HostServices>,
    /// Plugin registry.
    plugins: PluginRegistry,
    /// Phase registry.
    phases: Arc<PhaseRegistry>,
    /// Phase dispatcher.
    dispatcher: PhaseDispatcher,
}

impl Host {
    /// Returns a builder for the given configuration.
    pub fn builder(config: HostConfig) -> HostBuilder {
        HostBuilder::new(config)
    }

    /// Returns the shared site services.
    pub fn services(&self) -> &Arc<HostServices> {
        &self.services
    }

    /// Returns the plugin registry.
    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    /// Returns the phase registry.
    pub fn phase_registry(&self) -> &Arc<PhaseRegistry> {
        &self.phases
    }

    /// Installs a plugin from its export bundle.
    ///
    /// Installation makes the plugin known to the host but runs none of its
    /// code; phase handlers only start firing after activation. Installing
    /// the same plugin ID twice returns the first instance unchanged.
    pub async fn install(&self, export: PluginExport) -> Arc<dyn Plugin> {
        let (plugin, _fresh) = self.plugins.install(export).await;
        plugin
    }

    /// Activates an installed plugin.
    ///
    /// Runs the plugin's activation routine once, then registers its phase
    /// handlers. Activating an already active plugin is a no-op.
    pub async fn activate(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self.plugins.get(plugin_id).await.ok_or_else(|| {
            AppError::not_found(format!("Plugin '{}' is not installed", plugin_id))
        })?;

        if self.plugins.is_active(plugin_id).await {
            debug!(plugin_id = %plugin_id, "Plugin already active");
            return Ok(());
        }

        plugin.activate(&self.services).await?;

        for (phase, handler) in self.plugins.handlers_of(plugin_id).await {
            self.phases.register(phase, handler).await;
        }

        self.plugins.set_state(plugin_id, PluginState::Active).await;
        info!(plugin_id = %plugin_id, "Plugin activated");

        Ok(())
    }

    /// Deactivates an active plugin.
    ///
    /// Runs the plugin's deactivation routine once, then unregisters its
    /// phase handlers. Options the plugin wrote are left untouched.
    /// Deactivating a plugin that is not active is a no-op.
    pub async fn deactivate(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self.plugins.get(plugin_id).await.ok_or_else(|| {
            AppError::not_found(format!("Plugin '{}' is not installed", plugin_id))
        })?;

        if !self.plugins.is_active(plugin_id).await {
            debug!(plugin_id = %plugin_id, "Plugin not active, nothing to deactivate");
            return Ok(());
        }

        plugin.deactivate(&self.services).await?;

        self.phases.unregister_plugin(plugin_id).await;
        self.plugins
            .set_state(plugin_id, PluginState::Inactive)
            .await;
        info!(plugin_id = %plugin_id, "Plugin deactivated");

        Ok(())
    }

    /// Dispatches one full request through the phase cycle.
    ///
    /// Each phase in the request kind's order fires exactly once. Handler
    /// failures are collected in the report, never propagated. At the end of
    /// an admin request the pending notices are rendered into the report and
    /// transient ones are dropped; frontend requests do not render notices.
    pub async fn dispatch_request(&self, kind: RequestKind, user: UserContext) -> RequestReport {
        let request = RequestContext::new(kind, user);

        info!(
            request_id = %request.id,
            kind = %kind,
            user = %request.user.name,
            "Request started"
        );

        self.services.assets.clear().await;

        let mut phases_run = Vec::new();
        let mut handlers_run = 0;
        let mut failures = Vec::new();

        for &phase in kind.phase_order() {
            let outcome = self.dispatcher.dispatch(phase, &self.services, &request).await;
            phases_run.push(phase);
            handlers_run += outcome.handlers_run;
            failures.extend(outcome.failures);
        }

        let styles = self.services.assets.styles().await;
        let scripts = self.services.assets.scripts().await;

        let notices = if request.is_admin() {
            let rendered = self.services.notices.render_queue().await;
            self.services.notices.end_request().await;
            rendered
        } else {
            Vec::new()
        };

        info!(
            request_id = %request.id,
            handlers = handlers_run,
            failures = failures.len(),
            "Request finished"
        );

        RequestReport {
            request_id: request.id,
            kind,
            phases_run,
            handlers_run,
            failures,
            styles,
            scripts,
            notices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;
    use crate::plugin::{PluginExportBuilder, PluginInfo};
    use crate::registry::PhaseHandler;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    #[derive(Debug, Default)]
    struct ProbePlugin {
        activations: AtomicUsize,
        deactivations: AtomicUsize,
    }

    #[async_trait]
    impl Plugin for ProbePlugin {
        fn info(&self) -> PluginInfo {
            PluginInfo {
                id: "probe".to_string(),
                name: "Probe".to_string(),
                version: "1.0.0".to_string(),
                description: "Counts lifecycle calls".to_string(),
                author: "tests".to_string(),
            }
        }

        async fn activate(&self, _services: &HostServices) -> AppResult<()> {
            self.activations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn deactivate(&self, _services: &HostServices) -> AppResult<()> {
            self.deactivations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct ProbeHandler {
        phase_label: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PhaseHandler for ProbeHandler {
        async fn run(&self, _services: &HostServices, _request: &RequestContext) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn plugin_id(&self) -> &str {
            "probe"
        }

        fn name(&self) -> &str {
            &self.phase_label
        }
    }

    fn make_host() -> Host {
        Host::builder(HostConfig::default()).build()
    }

    #[tokio::test]
    async fn test_activate_runs_once_and_is_idempotent() {
        let host = make_host();
        let plugin = Arc::new(ProbePlugin::default());
        host.install(PluginExport::new(plugin.clone())).await;

        host.activate("probe").await.expect("activate");
        host.activate("probe").await.expect("second activate");

        assert_eq!(plugin.activations.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deactivate_unregisters_handlers() {
        let host = make_host();
        let calls = Arc::new(AtomicUsize::new(0));
        let plugin = Arc::new(ProbePlugin::default());

        let export = PluginExportBuilder::new(plugin.clone())
            .on(
                Phase::Init,
                Arc::new(ProbeHandler {
                    phase_label: "init_probe".to_string(),
                    calls: calls.clone(),
                }),
            )
            .build();

        host.install(export).await;
        host.activate("probe").await.expect("activate");

        host.dispatch_request(RequestKind::Frontend, UserContext::anonymous())
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        host.deactivate("probe").await.expect("deactivate");
        assert_eq!(plugin.deactivations.load(Ordering::SeqCst), 1);

        host.dispatch_request(RequestKind::Frontend, UserContext::anonymous())
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_handlers_do_not_fire_before_activation() {
        let host = make_host();
        let calls = Arc::new(AtomicUsize::new(0));

        let export = PluginExportBuilder::new(Arc::new(ProbePlugin::default()))
            .on(
                Phase::Init,
                Arc::new(ProbeHandler {
                    phase_label: "init_probe".to_string(),
                    calls: calls.clone(),
                }),
            )
            .build();
        host.install(export).await;

        let report = host
            .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
            .await;
        assert_eq!(report.handlers_run, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_activate_missing_plugin_fails() {
        let host = make_host();
        let err = host.activate("ghost").await.expect_err("should fail");
        assert!(err.to_string().contains("not installed"));
    }

    #[tokio::test]
    async fn test_admin_request_fires_admin_init() {
        let host = make_host();
        let init_calls = Arc::new(AtomicUsize::new(0));
        let admin_calls = Arc::new(AtomicUsize::new(0));

        let export = PluginExportBuilder::new(Arc::new(ProbePlugin::default()))
            .on(
                Phase::Init,
                Arc::new(ProbeHandler {
                    phase_label: "init_probe".to_string(),
                    calls: init_calls.clone(),
                }),
            )
            .on(
                Phase::AdminInit,
                Arc::new(ProbeHandler {
                    phase_label: "admin_probe".to_string(),
                    calls: admin_calls.clone(),
                }),
            )
            .build();

        host.install(export).await;
        host.activate("probe").await.expect("activate");

        let report = host
            .dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
            .await;
        assert_eq!(report.phases_run.len(), 4);
        assert_eq!(init_calls.load(Ordering::SeqCst), 1);
        assert_eq!(admin_calls.load(Ordering::SeqCst), 1);

        let report = host
            .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
            .await;
        assert_eq!(report.phases_run.len(), 3);
        assert_eq!(init_calls.load(Ordering::SeqCst), 2);
        assert_eq!(admin_calls.load(Ordering::SeqCst), 1);
    }
}
