//! Option keys and defaults for the example plugin.
//!
//! Keys here are unqualified; the settings controller prepends
//! [`OPTION_PREFIX`] before touching the store, so the stored keys are
//! `example_plugin_default_capacity` and so on.

use async_trait::async_trait;

use plugworks_core::OptionValue;
use plugworks_host::services::HostServices;
use plugworks_sdk::settings::SettingsDefaults;

/// Prefix for all stored option keys.
pub const OPTION_PREFIX: &str = "example_plugin";

/// Default capacity for new events.
pub const OPT_DEFAULT_CAPACITY: &str = "default_capacity";

/// Display format for event dates.
pub const OPT_DATE_FORMAT: &str = "date_format";

/// Whether virtual events carry a badge in listings.
pub const OPT_SHOW_VIRTUAL_BADGE: &str = "show_virtual_badge";

/// Address quota warning mails are sent to. Not stored by activation; its
/// default is computed from the site admin email.
pub const OPT_QUOTA_EMAIL: &str = "quota_email";

/// Seeded capacity value.
pub const DEFAULT_CAPACITY: i64 = 50;

/// Seeded date format value.
pub const DEFAULT_DATE_FORMAT: &str = "Y-m-d";

/// Seeded virtual badge value.
pub const DEFAULT_SHOW_VIRTUAL_BADGE: bool = true;

/// Computed defaults for options whose fallback depends on host state.
#[derive(Debug, Default)]
pub struct ExampleDefaults;

#[async_trait]
impl SettingsDefaults for ExampleDefaults {
    async fn default_for(&self, services: &HostServices, key: &str) -> Option<OptionValue> {
        match key {
            OPT_QUOTA_EMAIL => Some(OptionValue::from(
                services.config.site.admin_email.as_str(),
            )),
            _ => None,
        }
    }
}
