//! Shared site services passed to plugins and phase handlers.

use std::sync::Arc;

use plugworks_core::config::HostConfig;
use plugworks_core::OptionStore;

use crate::assets::AssetQueue;
use crate::catalog::ServiceCatalog;
use crate::content::ContentRegistry;
use crate::i18n::TranslationCatalog;
use crate::notices::NoticeBoard;
use crate::routes::RouteTable;

/// The application context handed to every plugin operation and phase
/// handler by reference. There is no global accessor; anything a plugin
/// needs from the host travels through this struct.
#[derive(Debug, Clone)]
pub struct HostServices {
    /// Host configuration.
    pub config: Arc<HostConfig>,
    /// Persistent option storage.
    pub options: Arc<dyn OptionStore>,
    /// Request-scoped asset queue.
    pub assets: Arc<AssetQueue>,
    /// Admin notice board.
    pub notices: Arc<NoticeBoard>,
    /// Site routing table.
    pub routes: Arc<RouteTable>,
    /// Content type registry.
    pub content: Arc<ContentRegistry>,
    /// Translation catalog.
    pub i18n: Arc<TranslationCatalog>,
    /// Catalog of available framework services.
    pub catalog: Arc<ServiceCatalog>,
}

impl HostServices {
    /// Creates a service set around the given configuration and option
    /// store, with every other service freshly initialized.
    pub fn new(config: HostConfig, options: Arc<dyn OptionStore>) -> Self {
        let routes = Arc::new(RouteTable::new());
        Self {
            config: Arc::new(config),
            options,
            assets: Arc::new(AssetQueue::new()),
            notices: Arc::new(NoticeBoard::new()),
            content: Arc::new(ContentRegistry::new(routes.clone())),
            routes,
            i18n: Arc::new(TranslationCatalog::new()),
            catalog: Arc::new(ServiceCatalog::new()),
        }
    }

    /// Returns the capability required to manage plugin settings.
    pub fn settings_capability(&self) -> &str {
        &self.config.site.settings_capability
    }

    /// Returns whether the site runs in debug mode.
    pub fn debug(&self) -> bool {
        self.config.site.debug
    }

    /// Returns the configured site locale.
    pub fn locale(&self) -> &str {
        &self.config.site.locale
    }
}
