//! Plugin handling configuration.

use serde::{Deserialize, Serialize};

/// Settings that control how the host treats installed plugins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginsConfig {
    /// Whether compiled-in plugins are installed automatically at startup.
    #[serde(default = "default_autoload")]
    pub autoload: bool,
    /// Directory plugins load translation catalogs from, relative to the
    /// plugin root.
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,
}

fn default_autoload() -> bool {
    true
}

fn default_translations_dir() -> String {
    "languages".to_string()
}

impl Default for PluginsConfig {
    fn default() -> Self {
        Self {
            autoload: default_autoload(),
            translations_dir: default_translations_dir(),
        }
    }
}
