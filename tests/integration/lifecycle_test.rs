//! Integration tests for plugin install, activation, and deactivation.

use std::sync::Arc;

use plugin_example::{PLUGIN_ID, PLUGIN_NAME, PLUGIN_VERSION};
use plugworks_core::AppResult;
use plugworks_host::phase::RequestKind;
use plugworks_host::plugin::{Plugin, PluginExport, PluginInfo};
use plugworks_host::services::HostServices;
use plugworks_host::users::UserContext;

use crate::helpers::TestHost;

#[tokio::test]
async fn test_activation_seeds_exactly_three_options() {
    let test = TestHost::with_active_plugin().await;

    assert_eq!(test.store.len(), 3);

    let services = test.services();
    let capacity = services
        .options
        .get("example_plugin_default_capacity")
        .await
        .expect("get")
        .expect("capacity seeded");
    assert_eq!(capacity.as_int(), Some(50));

    let format = services
        .options
        .get("example_plugin_date_format")
        .await
        .expect("get")
        .expect("format seeded");
    assert_eq!(format.storage_repr(), "Y-m-d");

    let badge = services
        .options
        .get("example_plugin_show_virtual_badge")
        .await
        .expect("get")
        .expect("badge seeded");
    assert_eq!(badge.storage_repr(), "true");
    assert_eq!(badge.as_bool(), Some(true));
}

#[tokio::test]
async fn test_reactivation_preserves_modified_options() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    services
        .options
        .set(
            "example_plugin_default_capacity",
            plugworks_core::OptionValue::Int(99),
        )
        .await
        .expect("set");

    test.host.deactivate(PLUGIN_ID).await.expect("deactivate");
    test.host.activate(PLUGIN_ID).await.expect("reactivate");

    let capacity = services
        .options
        .get("example_plugin_default_capacity")
        .await
        .expect("get")
        .expect("still present");
    assert_eq!(capacity.as_int(), Some(99));
    assert_eq!(test.store.len(), 3);
}

#[tokio::test]
async fn test_deactivation_preserves_options_and_clears_content() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    // A request registers the plugin's content types.
    test.host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;
    assert!(services.content.post_type("event").await.is_some());

    let rules = services.routes.rules(&services.content).await;
    assert_eq!(rules.len(), 2);

    test.host.deactivate(PLUGIN_ID).await.expect("deactivate");

    assert_eq!(test.store.len(), 3);
    assert!(services.content.post_type("event").await.is_none());
    assert!(services.routes.is_stale().await);
    assert!(services.routes.rules(&services.content).await.is_empty());
}

#[tokio::test]
async fn test_route_generation_advances_across_lifecycle() {
    let test = TestHost::with_active_plugin().await;
    let services = test.services();

    test.host
        .dispatch_request(RequestKind::Frontend, UserContext::anonymous())
        .await;
    services.routes.rules(&services.content).await;
    let before = services.routes.generation().await;

    test.host.deactivate(PLUGIN_ID).await.expect("deactivate");
    services.routes.rules(&services.content).await;

    assert!(services.routes.generation().await > before);
    assert!(services.routes.last_flush().await.is_some());
}

/// A plugin that reuses the example plugin's ID under different metadata.
#[derive(Debug)]
struct ImpostorPlugin;

#[async_trait::async_trait]
impl Plugin for ImpostorPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: PLUGIN_ID.to_string(),
            name: "Renamed Plugin".to_string(),
            version: "9.9.9".to_string(),
            description: "Same ID, different metadata".to_string(),
            author: "tests".to_string(),
        }
    }

    async fn activate(&self, _services: &HostServices) -> AppResult<()> {
        Ok(())
    }

    async fn deactivate(&self, _services: &HostServices) -> AppResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_duplicate_install_returns_first_instance() {
    let test = TestHost::new();
    let services = test.services();

    let first_export = plugin_example::bootstrap(services).await.expect("bootstrap");
    let second_export = PluginExport::new(Arc::new(ImpostorPlugin));

    let first = test.host.install(first_export).await;
    let second = test.host.install(second_export).await;

    // The colliding install is discarded and the first instance keeps its
    // original metadata.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(test.host.plugins().count().await, 1);
    assert_eq!(second.info().name, PLUGIN_NAME);
    assert_eq!(second.info().version, PLUGIN_VERSION);
}

#[tokio::test]
async fn test_bootstrap_on_bare_host_raises_persistent_notice() {
    // No framework services registered at all.
    let store = Arc::new(plugworks_host::options::MemoryOptionStore::new());
    let host = plugworks_host::host::Host::builder(
        plugworks_core::config::HostConfig::default(),
    )
    .with_options(store)
    .build();
    let services = host.services();

    let err = plugin_example::bootstrap(services)
        .await
        .expect_err("bootstrap should fail");
    assert!(err.to_string().contains("missing"));

    assert!(services.notices.has_persistent().await);
    assert!(!host.plugins().contains(PLUGIN_ID).await);

    // The notice survives an admin render cycle.
    host.dispatch_request(RequestKind::Admin, UserContext::administrator("alice"))
        .await;
    assert!(services.notices.has_persistent().await);
}
