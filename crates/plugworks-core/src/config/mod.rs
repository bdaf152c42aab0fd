//! Host configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod logging;
pub mod plugins;
pub mod site;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::plugins::PluginsConfig;
use self::site::SiteConfig;

use crate::error::AppError;

/// Root host configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay). Every
/// section falls back to its documented defaults, so an absent file or
/// an empty section still yields a usable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Site-wide settings (name, admin email, debug flag).
    #[serde(default)]
    pub site: SiteConfig,
    /// Plugin handling settings.
    #[serde(default)]
    pub plugins: PluginsConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HostConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PLUGWORKS`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        tracing::debug!(environment = %env, "Loading host configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PLUGWORKS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: HostConfig = toml::from_str("").expect("parse empty toml");
        assert_eq!(config.site.name, "Plugworks Dev Site");
        assert!(!config.site.debug);
        assert_eq!(config.logging.level, "info");
        assert!(config.plugins.autoload);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = "[site]\ndebug = true\n";
        let config: HostConfig = toml::from_str(toml_str).expect("parse toml");
        assert!(config.site.debug);
        assert_eq!(config.site.settings_capability, "manage_options");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_from_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let config_dir = temp.path().join("config");
        std::fs::create_dir_all(&config_dir).expect("mkdir");
        std::fs::write(
            config_dir.join("default.toml"),
            "[site]\nname = \"Test Site\"\nadmin_email = \"ops@test.invalid\"\n",
        )
        .expect("write config");

        let cwd = std::env::current_dir().expect("cwd");
        std::env::set_current_dir(temp.path()).expect("chdir");
        let loaded = HostConfig::load("development");
        std::env::set_current_dir(cwd).expect("chdir back");

        let config = loaded.expect("load config");
        assert_eq!(config.site.name, "Test Site");
        assert_eq!(config.site.admin_email, "ops@test.invalid");
    }
}
