//! The plugin application context and its phase handlers.
//!
//! `ExamplePlugin` is the single per-process plugin instance. The host owns
//! it after install; handlers and other components reach it through an
//! `Arc` rather than a global accessor. Sub-components that only matter on
//! some requests (admin hooks, public hooks) are built lazily on first use
//! and cached.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, error, info};

use plugworks_core::{AppError, AppResult, ComponentInfo};
use plugworks_host::content::{MetaBox, PostType, Taxonomy};
use plugworks_host::notices::{Notice, NoticeLevel};
use plugworks_host::phase::Phase;
use plugworks_host::plugin::{Plugin, PluginExport, PluginExportBuilder, PluginInfo};
use plugworks_host::registry::PhaseHandler;
use plugworks_host::request::RequestContext;
use plugworks_host::services::HostServices;
use plugworks_sdk::framework::SERVICE_SET;
use plugworks_sdk::plugin_info;

use crate::admin_hooks::AdminHooks;
use crate::public_hooks::PublicHooks;
use crate::settings::ExampleSettings;
use crate::{PLUGIN_ID, PLUGIN_NAME, PLUGIN_VERSION, TEXT_DOMAIN};

/// The example plugin.
#[derive(Debug)]
pub struct ExamplePlugin {
    component: ComponentInfo,
    settings: ExampleSettings,
    admin_hooks: OnceLock<AdminHooks>,
    public_hooks: OnceLock<PublicHooks>,
}

impl ExamplePlugin {
    /// Creates the plugin context.
    pub fn new() -> Self {
        let component = ComponentInfo::new(PLUGIN_ID, PLUGIN_VERSION);
        let settings = ExampleSettings::new(component.clone());
        Self {
            component,
            settings,
            admin_hooks: OnceLock::new(),
            public_hooks: OnceLock::new(),
        }
    }

    /// Returns the component identity.
    pub fn component(&self) -> &ComponentInfo {
        &self.component
    }

    /// Returns the settings component.
    pub fn settings(&self) -> &ExampleSettings {
        &self.settings
    }

    /// Returns the admin hooks manager, building it on first access.
    pub fn admin_hooks(&self) -> &AdminHooks {
        self.admin_hooks
            .get_or_init(|| AdminHooks::new(self.component.clone()))
    }

    /// Returns the public hooks manager, building it on first access.
    pub fn public_hooks(&self) -> &PublicHooks {
        self.public_hooks
            .get_or_init(|| PublicHooks::new(self.component.clone()))
    }
}

impl Default for ExamplePlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for ExamplePlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: PLUGIN_ID,
            name: PLUGIN_NAME,
            version: PLUGIN_VERSION,
            description: "Skeleton plugin exercising settings, content types, and assets",
            author: "Plugworks"
        )
    }

    /// Seeds absent option defaults and flushes the routing table.
    /// Idempotent across repeated activations.
    async fn activate(&self, services: &HostServices) -> AppResult<()> {
        let written = self.settings.install_defaults(services).await?;
        services.routes.flush().await;
        info!(options_written = written, "Example plugin activated");
        Ok(())
    }

    /// Drops the plugin's content registrations and flushes the routing
    /// table. Options are preserved so a later reactivation keeps the
    /// user's configuration.
    async fn deactivate(&self, services: &HostServices) -> AppResult<()> {
        let removed = services.content.remove_source(PLUGIN_ID).await;
        services.routes.flush().await;
        info!(
            definitions_removed = removed,
            "Example plugin deactivated, options preserved"
        );
        Ok(())
    }
}

/// Builds the plugin export after verifying the host provides the framework
/// services the plugin depends on.
///
/// A missing service posts a persistent admin error notice naming what is
/// absent and aborts the bootstrap, so the plugin is never installed on a
/// broken host.
pub async fn bootstrap(services: &HostServices) -> AppResult<PluginExport> {
    let missing = services.catalog.missing(SERVICE_SET);
    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|(key, _)| *key).collect();
        let message = format!(
            "Example Plugin cannot start: required framework services are missing ({}). \
             Reinstall the framework service set, then reactivate the plugin.",
            names.join(", ")
        );
        services
            .notices
            .post(Notice::new(NoticeLevel::Error, PLUGIN_ID, &message).persistent())
            .await;
        error!(missing = ?names, "Example plugin bootstrap aborted");
        return Err(AppError::plugin(message));
    }

    let plugin = Arc::new(ExamplePlugin::new());
    let export = PluginExportBuilder::new(plugin.clone())
        .on(Phase::PluginsLoaded, Arc::new(LoadTextdomainHandler))
        .on(
            Phase::Init,
            Arc::new(InitHandler {
                plugin: plugin.clone(),
            }),
        )
        .on(
            Phase::AdminInit,
            Arc::new(AdminInitHandler {
                plugin: plugin.clone(),
            }),
        )
        .on(Phase::QueryReady, Arc::new(QueryReadyHandler))
        .build();
    Ok(export)
}

/// Loads the plugin textdomain. Runs at PluginsLoaded on every request;
/// the catalog keeps the first load and ignores repeats.
#[derive(Debug)]
struct LoadTextdomainHandler;

#[async_trait]
impl PhaseHandler for LoadTextdomainHandler {
    async fn run(&self, services: &HostServices, _request: &RequestContext) -> AppResult<()> {
        services.i18n.load_text_domain(
            TEXT_DOMAIN,
            services.locale(),
            &services.config.plugins.translations_dir,
        );
        Ok(())
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        "load_textdomain"
    }
}

/// Registers the plugin's content types and, on front-end requests,
/// enqueues the public assets.
#[derive(Debug)]
struct InitHandler {
    plugin: Arc<ExamplePlugin>,
}

#[async_trait]
impl PhaseHandler for InitHandler {
    async fn run(&self, services: &HostServices, request: &RequestContext) -> AppResult<()> {
        services
            .content
            .register_post_type(PostType {
                key: "event".to_string(),
                singular: "Event".to_string(),
                plural: "Events".to_string(),
                public: true,
                source: PLUGIN_ID.to_string(),
            })
            .await;
        services
            .content
            .register_taxonomy(Taxonomy {
                key: "event-category".to_string(),
                label: "Event Categories".to_string(),
                object_type: "event".to_string(),
                source: PLUGIN_ID.to_string(),
            })
            .await;
        services
            .content
            .register_meta_box(MetaBox {
                id: "event-details".to_string(),
                title: "Event Details".to_string(),
                post_type: "event".to_string(),
                source: PLUGIN_ID.to_string(),
            })
            .await;

        if !request.is_admin() {
            self.plugin.public_hooks().enqueue_assets(services).await;
        }
        Ok(())
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        "register_content"
    }
}

/// Enqueues the admin assets. AdminInit only fires on admin requests.
#[derive(Debug)]
struct AdminInitHandler {
    plugin: Arc<ExamplePlugin>,
}

#[async_trait]
impl PhaseHandler for AdminInitHandler {
    async fn run(&self, services: &HostServices, _request: &RequestContext) -> AppResult<()> {
        self.plugin.admin_hooks().enqueue_assets(services).await;
        Ok(())
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        "enqueue_admin_assets"
    }
}

/// Late-init hook. The plugin has no query-time behavior yet; the handler
/// keeps the phase wired so adding some is a one-line change.
#[derive(Debug)]
struct QueryReadyHandler;

#[async_trait]
impl PhaseHandler for QueryReadyHandler {
    async fn run(&self, _services: &HostServices, request: &RequestContext) -> AppResult<()> {
        debug!(request_id = %request.id, "ExamplePlugin: query ready");
        Ok(())
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        "query_ready"
    }
}
