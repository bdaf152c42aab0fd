//! Example plugin for the Plugworks framework.
//!
//! A small but complete plugin: it seeds option defaults on activation,
//! registers an `event` post type with a taxonomy and a meta box, enqueues
//! admin and public assets through the dedup queue, and serves a
//! capability-gated settings page. Useful as a starting point for new
//! plugins and as the fixture for the framework's integration tests.

pub mod admin_hooks;
pub mod date_format;
pub mod options;
pub mod plugin;
pub mod public_hooks;
pub mod settings;

pub use admin_hooks::AdminHooks;
pub use plugin::{bootstrap, ExamplePlugin};
pub use public_hooks::PublicHooks;
pub use settings::{ExampleSettings, SettingsFormData, SettingsSnapshot};

/// Plugin identifier, also the option source tag and asset handle stem.
pub const PLUGIN_ID: &str = "example-plugin";

/// Human-readable plugin name.
pub const PLUGIN_NAME: &str = "Example Plugin";

/// Plugin version.
pub const PLUGIN_VERSION: &str = "1.0.6";

/// Textdomain for translations.
pub const TEXT_DOMAIN: &str = "example-plugin";
