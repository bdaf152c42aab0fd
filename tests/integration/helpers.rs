//! Shared test helpers for integration tests.

use std::sync::Arc;

use plugin_example::{ExampleSettings, PLUGIN_ID, PLUGIN_VERSION};
use plugworks_core::config::HostConfig;
use plugworks_core::ComponentInfo;
use plugworks_host::host::Host;
use plugworks_host::options::MemoryOptionStore;
use plugworks_host::services::HostServices;
use plugworks_sdk::framework::register_services;

/// Test host context
pub struct TestHost {
    /// The host under test
    pub host: Host,
    /// Concrete option store handle, for traffic assertions
    pub store: Arc<MemoryOptionStore>,
}

impl TestHost {
    /// Create a host with the full framework service set registered.
    pub fn new() -> Self {
        let store = Arc::new(MemoryOptionStore::new());
        let host = Host::builder(HostConfig::default())
            .with_options(store.clone())
            .build();
        register_services(&host.services().catalog);
        Self { host, store }
    }

    /// Create a host with the example plugin installed and activated.
    pub async fn with_active_plugin() -> Self {
        let test = Self::new();
        let export = plugin_example::bootstrap(test.host.services())
            .await
            .expect("bootstrap");
        test.host.install(export).await;
        test.host.activate(PLUGIN_ID).await.expect("activate");
        test
    }

    /// Shorthand for the shared services.
    pub fn services(&self) -> &Arc<HostServices> {
        self.host.services()
    }
}

/// Settings component wired to the example plugin's identity.
pub fn example_settings() -> ExampleSettings {
    ExampleSettings::new(ComponentInfo::new(PLUGIN_ID, PLUGIN_VERSION))
}
