//! Settings controller.
//!
//! Plugins hold a `SettingsController` as a field instead of inheriting a
//! settings base class. The controller owns option key qualification, typed
//! option access, default installation, the capability gate, and the shared
//! settings page chrome. Booleans are stored as the strings `"true"` and
//! `"false"` for compatibility with options written by earlier releases.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use plugworks_core::{AppResult, ComponentInfo, OptionValue};
use plugworks_host::services::HostServices;
use plugworks_host::users::UserContext;

/// Override point for computed option defaults.
///
/// When an option has no stored value, the controller asks this trait before
/// giving up, so a plugin can derive a default from host state (the site
/// admin email, for example).
#[async_trait]
pub trait SettingsDefaults: Send + Sync + std::fmt::Debug {
    /// Returns the computed default for an unqualified option key, or None
    /// when the option has no computed default.
    async fn default_for(&self, services: &HostServices, key: &str) -> Option<OptionValue>;
}

/// The no-op defaults provider: every option defaults to nothing.
#[derive(Debug, Default)]
pub struct NoDefaults;

#[async_trait]
impl SettingsDefaults for NoDefaults {
    async fn default_for(&self, _services: &HostServices, _key: &str) -> Option<OptionValue> {
        None
    }
}

/// Settings management for one plugin.
#[derive(Debug, Clone)]
pub struct SettingsController {
    /// Component identity of the owning plugin.
    component: ComponentInfo,
    /// Title shown on the settings page. Defaults to the component name.
    title: String,
    /// Prefix prepended to every option key.
    prefix: String,
    /// Text domain used to translate chrome strings.
    text_domain: String,
    /// Computed defaults provider.
    defaults: Arc<dyn SettingsDefaults>,
}

impl SettingsController {
    /// Creates a controller with no computed defaults.
    pub fn new(component: ComponentInfo, prefix: &str, text_domain: &str) -> Self {
        Self {
            title: component.name().to_string(),
            component,
            prefix: prefix.to_string(),
            text_domain: text_domain.to_string(),
            defaults: Arc::new(NoDefaults),
        }
    }

    /// Replaces the settings page title.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Replaces the computed defaults provider.
    pub fn with_defaults(mut self, defaults: Arc<dyn SettingsDefaults>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Returns the owning component.
    pub fn component(&self) -> &ComponentInfo {
        &self.component
    }

    /// Returns the fully qualified option key for an unqualified name.
    pub fn qualify(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key)
    }

    /// Returns whether the user may view and save this plugin's settings.
    pub fn user_can_manage(&self, services: &HostServices, user: &UserContext) -> bool {
        user.can(services.settings_capability())
    }

    // ── Typed option access ──

    async fn stored_or_default(
        &self,
        services: &HostServices,
        key: &str,
    ) -> AppResult<Option<OptionValue>> {
        let stored = services.options.get(&self.qualify(key)).await?;
        match stored {
            Some(value) => Ok(Some(value)),
            None => Ok(self.defaults.default_for(services, key).await),
        }
    }

    /// Reads a string option, falling back to the computed default.
    pub async fn string_option(
        &self,
        services: &HostServices,
        key: &str,
    ) -> AppResult<Option<String>> {
        Ok(self
            .stored_or_default(services, key)
            .await?
            .map(|v| v.storage_repr()))
    }

    /// Reads an integer option, falling back to the computed default.
    pub async fn int_option(&self, services: &HostServices, key: &str) -> AppResult<Option<i64>> {
        Ok(self
            .stored_or_default(services, key)
            .await?
            .and_then(|v| v.as_int()))
    }

    /// Reads a boolean option, decoding the legacy string encodings.
    pub async fn bool_option(&self, services: &HostServices, key: &str) -> AppResult<Option<bool>> {
        Ok(self
            .stored_or_default(services, key)
            .await?
            .and_then(|v| v.as_bool()))
    }

    /// Writes a string option.
    pub async fn set_string(
        &self,
        services: &HostServices,
        key: &str,
        value: &str,
    ) -> AppResult<()> {
        services
            .options
            .set(&self.qualify(key), OptionValue::from(value))
            .await
    }

    /// Writes an integer option.
    pub async fn set_int(&self, services: &HostServices, key: &str, value: i64) -> AppResult<()> {
        services
            .options
            .set(&self.qualify(key), OptionValue::Int(value))
            .await
    }

    /// Writes a boolean option in the legacy string encoding.
    pub async fn set_bool(&self, services: &HostServices, key: &str, value: bool) -> AppResult<()> {
        let encoded = if value { "true" } else { "false" };
        services
            .options
            .set(&self.qualify(key), OptionValue::from(encoded))
            .await
    }

    /// Installs a default for an option, writing only when the option has
    /// no stored value. The computed defaults provider takes precedence over
    /// the fallback. Returns true if a value was written.
    pub async fn install_default(
        &self,
        services: &HostServices,
        key: &str,
        fallback: OptionValue,
    ) -> AppResult<bool> {
        let value = match self.defaults.default_for(services, key).await {
            Some(computed) => computed,
            None => fallback,
        };
        let written = services
            .options
            .set_if_absent(&self.qualify(key), value)
            .await?;
        if written {
            debug!(option = %self.qualify(key), "Default option installed");
        }
        Ok(written)
    }

    // ── Settings page chrome ──

    /// Opens the settings page wrapper.
    pub fn open_wrap(&self) -> &'static str {
        r#"<div class="wrap">"#
    }

    /// Closes the settings page wrapper.
    pub fn close_wrap(&self) -> &'static str {
        "</div>"
    }

    /// Renders the page title.
    pub fn page_title(&self) -> String {
        format!("<h1>{}</h1>", escape_html(&self.title))
    }

    /// Opens the settings form posting to the given action.
    pub fn open_form(&self, action: &str) -> String {
        format!(r#"<form method="post" action="{}">"#, escape_html(action))
    }

    /// Closes the settings form.
    pub fn close_form(&self) -> &'static str {
        "</form>"
    }

    /// Renders the submit button.
    pub fn submit_button(&self, services: &HostServices) -> String {
        let label = services.i18n.translate(&self.text_domain, "Save Changes");
        format!(
            r#"<p class="submit"><button type="submit" class="button button-primary">{}</button></p>"#,
            escape_html(&label)
        )
    }

    /// Renders the inline message shown to users without the settings
    /// capability. Nothing else may be rendered in that case.
    pub fn unauthorized_message(&self, services: &HostServices) -> String {
        let text = services.i18n.translate(&self.text_domain, "Not authorized");
        format!("<p>{}</p>", escape_html(&text))
    }
}

/// Escapes text for safe interpolation into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
