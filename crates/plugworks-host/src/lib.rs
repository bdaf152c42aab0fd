//! Plugin host runtime for Plugworks.
//!
//! The host owns the shared site services (options, assets, notices, routes,
//! content registry) and drives installed plugins through an explicit,
//! ordered list of request phases. Plugins receive the services by
//! reference; there is no global state and no singleton access path.

pub mod assets;
pub mod catalog;
pub mod content;
pub mod dispatcher;
pub mod host;
pub mod i18n;
pub mod notices;
pub mod options;
pub mod phase;
pub mod plugin;
pub mod registry;
pub mod request;
pub mod routes;
pub mod services;
pub mod users;

pub use assets::{Asset, AssetKind, AssetQueue};
pub use catalog::{ServiceCatalog, ServiceEntry};
pub use content::{ContentRegistry, MetaBox, PostType, Taxonomy};
pub use dispatcher::{DispatchOutcome, PhaseDispatcher};
pub use host::{Host, HostBuilder};
pub use i18n::TranslationCatalog;
pub use notices::{Notice, NoticeBoard, NoticeLevel};
pub use options::MemoryOptionStore;
pub use phase::{Phase, RequestKind};
pub use plugin::{Plugin, PluginExport, PluginExportBuilder, PluginInfo, PluginState};
pub use registry::{PhaseHandler, PhaseRegistry};
pub use request::{HandlerFailure, RequestContext, RequestReport};
pub use routes::{RouteRule, RouteTable};
pub use services::HostServices;
pub use users::UserContext;
