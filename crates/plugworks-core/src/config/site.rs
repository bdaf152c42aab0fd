//! Site-wide configuration.

use serde::{Deserialize, Serialize};

/// Settings that describe the hosting site itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Human-readable site name, shown in rendered page chrome.
    #[serde(default = "default_name")]
    pub name: String,
    /// Administrator contact address. Plugins may derive defaults from it.
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    /// Locale identifier used when loading plugin translations.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Debug mode. When enabled, plugins append cache-busting suffixes to
    /// asset versions.
    #[serde(default)]
    pub debug: bool,
    /// Capability required to view and save plugin settings pages.
    #[serde(default = "default_settings_capability")]
    pub settings_capability: String,
}

fn default_name() -> String {
    "Plugworks Dev Site".to_string()
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_settings_capability() -> String {
    "manage_options".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            admin_email: default_admin_email(),
            locale: default_locale(),
            debug: false,
            settings_capability: default_settings_capability(),
        }
    }
}
