//! Public-facing hooks.

use plugworks_core::ComponentInfo;
use plugworks_host::services::HostServices;

/// Handles public-facing wiring for the plugin.
#[derive(Debug, Clone)]
pub struct PublicHooks {
    /// Component identity.
    component: ComponentInfo,
}

impl PublicHooks {
    /// Creates the public hooks manager.
    pub fn new(component: ComponentInfo) -> Self {
        Self { component }
    }

    /// Enqueues public-facing styles and scripts.
    ///
    /// Safe to call more than once per request; the asset queue dedupes on
    /// handle.
    pub async fn enqueue_assets(&self, services: &HostServices) {
        let version = self.asset_version(services);
        let handle = self.component.asset_handle("public");

        services
            .assets
            .enqueue_style(&handle, "assets/css/example-public.css", &version)
            .await;
        services
            .assets
            .enqueue_script(&handle, "assets/js/example-public.js", &version)
            .await;

        tracing::debug!("PublicHooks: enqueue_assets called");
    }

    fn asset_version(&self, services: &HostServices) -> String {
        if services.debug() {
            format!("{}-dev", self.component.version())
        } else {
            self.component.version().to_string()
        }
    }
}
