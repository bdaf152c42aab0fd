//! Admin-area hooks.

use plugworks_core::ComponentInfo;
use plugworks_host::services::HostServices;

/// Handles admin-area wiring for the plugin.
#[derive(Debug, Clone)]
pub struct AdminHooks {
    /// Component identity.
    component: ComponentInfo,
}

impl AdminHooks {
    /// Creates the admin hooks manager.
    pub fn new(component: ComponentInfo) -> Self {
        Self { component }
    }

    /// Enqueues admin-area styles and scripts.
    ///
    /// Safe to call more than once per request; the asset queue dedupes on
    /// handle.
    pub async fn enqueue_assets(&self, services: &HostServices) {
        let version = self.asset_version(services);
        let handle = self.component.asset_handle("admin");

        services
            .assets
            .enqueue_style(&handle, "assets/css/example-admin.css", &version)
            .await;
        services
            .assets
            .enqueue_script(&handle, "assets/js/example-admin.js", &version)
            .await;

        tracing::debug!("AdminHooks: enqueue_assets called");
    }

    fn asset_version(&self, services: &HostServices) -> String {
        if services.debug() {
            format!("{}-dev", self.component.version())
        } else {
            self.component.version().to_string()
        }
    }
}
