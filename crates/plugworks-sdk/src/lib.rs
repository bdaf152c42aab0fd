//! # plugworks-sdk
//!
//! SDK for developing plugins for Plugworks hosts.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plugworks_sdk::prelude::*;
//!
//! #[derive(Debug)]
//! struct MyPlugin;
//!
//! #[async_trait]
//! impl Plugin for MyPlugin {
//!     fn info(&self) -> PluginInfo {
//!         plugin_info!(
//!             id: "my-plugin",
//!             name: "My Plugin",
//!             version: "1.0.0",
//!             description: "A sample plugin",
//!             author: "Developer"
//!         )
//!     }
//!
//!     async fn activate(&self, services: &HostServices) -> AppResult<()> {
//!         services.routes.flush().await;
//!         Ok(())
//!     }
//!
//!     async fn deactivate(&self, services: &HostServices) -> AppResult<()> {
//!         services.routes.flush().await;
//!         Ok(())
//!     }
//! }
//! ```

pub mod form;
pub mod framework;
pub mod macros;
pub mod settings;

/// Prelude for convenient imports.
pub mod prelude {
    pub use async_trait::async_trait;
    pub use plugworks_core::{AppError, AppResult, ComponentInfo, OptionValue};
    pub use plugworks_host::phase::{Phase, RequestKind};
    pub use plugworks_host::plugin::{Plugin, PluginExport, PluginExportBuilder, PluginInfo};
    pub use plugworks_host::registry::PhaseHandler;
    pub use plugworks_host::request::RequestContext;
    pub use plugworks_host::services::HostServices;

    pub use crate::form::FormData;
    pub use crate::framework::{register_services, SERVICE_SET};
    pub use crate::settings::{escape_html, NoDefaults, SettingsController, SettingsDefaults};

    pub use crate::plugin_info;
}
