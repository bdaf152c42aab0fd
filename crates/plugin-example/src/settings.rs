//! Plugin settings controller.
//!
//! Holds a [`SettingsController`] and handles all plugin settings,
//! including rendering the settings page and saving options. The settings
//! capability is checked before anything else; an unauthorized user gets
//! the inline message and no option is read or written on their behalf.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use validator::Validate;

use plugworks_core::{AppError, AppResult, ComponentInfo};
use plugworks_host::notices::{Notice, NoticeLevel};
use plugworks_host::services::HostServices;
use plugworks_host::users::UserContext;
use plugworks_sdk::form::FormData;
use plugworks_sdk::settings::{escape_html, SettingsController};

use crate::date_format;
use crate::options::{
    ExampleDefaults, DEFAULT_CAPACITY, DEFAULT_DATE_FORMAT, DEFAULT_SHOW_VIRTUAL_BADGE,
    OPTION_PREFIX, OPT_DATE_FORMAT, OPT_DEFAULT_CAPACITY, OPT_SHOW_VIRTUAL_BADGE,
};
use crate::{PLUGIN_ID, PLUGIN_NAME, TEXT_DOMAIN};

/// Current values of the plugin's options, with seeded fallbacks applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    /// Default capacity for new events.
    pub default_capacity: i64,
    /// Display format for event dates.
    pub date_format: String,
    /// Whether virtual events carry a badge.
    pub show_virtual_badge: bool,
}

/// Validated settings form submission.
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct SettingsFormData {
    /// Capacity between 1 and 10000.
    #[validate(range(min = 1, max = 10000))]
    pub default_capacity: i64,
    /// Legacy-token date format.
    pub date_format: String,
    /// Checkbox state.
    pub show_virtual_badge: bool,
}

impl SettingsFormData {
    /// Builds form data from a raw submission.
    ///
    /// The checkbox follows form encoding: present means checked. The other
    /// fields are required.
    pub fn from_form(form: &FormData) -> AppResult<Self> {
        let capacity_raw = form
            .get_trimmed(OPT_DEFAULT_CAPACITY)
            .ok_or_else(|| AppError::validation("default_capacity is required"))?;
        let default_capacity = capacity_raw.parse::<i64>().map_err(|_| {
            AppError::validation(format!(
                "default_capacity must be a number, got '{capacity_raw}'"
            ))
        })?;

        let date_format = form
            .get_trimmed(OPT_DATE_FORMAT)
            .ok_or_else(|| AppError::validation("date_format is required"))?
            .to_string();

        Ok(Self {
            default_capacity,
            date_format,
            show_virtual_badge: form.has(OPT_SHOW_VIRTUAL_BADGE),
        })
    }
}

/// Settings for the example plugin.
#[derive(Debug, Clone)]
pub struct ExampleSettings {
    /// Composed settings controller.
    controller: SettingsController,
}

impl ExampleSettings {
    /// Creates the settings component.
    pub fn new(component: ComponentInfo) -> Self {
        let controller = SettingsController::new(component, OPTION_PREFIX, TEXT_DOMAIN)
            .with_title(PLUGIN_NAME)
            .with_defaults(Arc::new(ExampleDefaults));
        Self { controller }
    }

    /// Returns the underlying controller.
    pub fn controller(&self) -> &SettingsController {
        &self.controller
    }

    /// Reads the current option values, applying seeded fallbacks for
    /// options that have never been written.
    pub async fn snapshot(&self, services: &HostServices) -> AppResult<SettingsSnapshot> {
        let default_capacity = self
            .controller
            .int_option(services, OPT_DEFAULT_CAPACITY)
            .await?
            .unwrap_or(DEFAULT_CAPACITY);
        let date_format = self
            .controller
            .string_option(services, OPT_DATE_FORMAT)
            .await?
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());
        let show_virtual_badge = self
            .controller
            .bool_option(services, OPT_SHOW_VIRTUAL_BADGE)
            .await?
            .unwrap_or(DEFAULT_SHOW_VIRTUAL_BADGE);

        Ok(SettingsSnapshot {
            default_capacity,
            date_format,
            show_virtual_badge,
        })
    }

    /// Seeds the option defaults, writing only options that are absent.
    /// Returns how many options were written.
    pub async fn install_defaults(&self, services: &HostServices) -> AppResult<usize> {
        let mut written = 0;

        for (key, value) in [
            (OPT_DEFAULT_CAPACITY, DEFAULT_CAPACITY.into()),
            (OPT_DATE_FORMAT, DEFAULT_DATE_FORMAT.into()),
            (
                OPT_SHOW_VIRTUAL_BADGE,
                if DEFAULT_SHOW_VIRTUAL_BADGE {
                    "true".into()
                } else {
                    "false".into()
                },
            ),
        ] {
            if self.controller.install_default(services, key, value).await? {
                written += 1;
            }
        }

        Ok(written)
    }

    /// Renders the settings page.
    ///
    /// Users without the settings capability get the inline unauthorized
    /// message and nothing else; in particular no option is read.
    pub async fn render_settings_page(
        &self,
        services: &HostServices,
        user: &UserContext,
    ) -> AppResult<String> {
        if !self.controller.user_can_manage(services, user) {
            return Ok(self.controller.unauthorized_message(services));
        }

        let snapshot = self.snapshot(services).await?;

        let mut page = String::new();
        page.push_str(self.controller.open_wrap());
        page.push_str(&self.controller.page_title());
        page.push_str(&self.controller.open_form("options.php"));
        page.push_str(&self.render_fields(services, &snapshot));
        page.push_str(&self.controller.submit_button(services));
        page.push_str(self.controller.close_form());
        page.push_str(self.controller.close_wrap());
        Ok(page)
    }

    /// Validates and saves a settings form submission.
    ///
    /// Validation failures write nothing. A successful save posts a
    /// transient success notice.
    pub async fn save_settings(
        &self,
        services: &HostServices,
        user: &UserContext,
        form: &FormData,
    ) -> AppResult<()> {
        if !self.controller.user_can_manage(services, user) {
            return Err(AppError::authorization("Not authorized"));
        }

        let data = SettingsFormData::from_form(form)?;
        data.validate()
            .map_err(|e| AppError::validation(format!("Invalid settings: {e}")))?;

        if !date_format::is_valid(&data.date_format) {
            return Err(AppError::validation(format!(
                "date_format '{}' is not a valid format string",
                data.date_format
            )));
        }

        self.controller
            .set_int(services, OPT_DEFAULT_CAPACITY, data.default_capacity)
            .await?;
        self.controller
            .set_string(services, OPT_DATE_FORMAT, &data.date_format)
            .await?;
        self.controller
            .set_bool(services, OPT_SHOW_VIRTUAL_BADGE, data.show_virtual_badge)
            .await?;

        services
            .notices
            .post(Notice::new(
                NoticeLevel::Success,
                PLUGIN_ID,
                "Settings saved.",
            ))
            .await;
        tracing::info!("Example plugin settings saved");

        Ok(())
    }

    fn render_fields(&self, services: &HostServices, snapshot: &SettingsSnapshot) -> String {
        let t = |text: &str| services.i18n.translate(TEXT_DOMAIN, text);
        let checked = if snapshot.show_virtual_badge {
            " checked"
        } else {
            ""
        };

        format!(
            concat!(
                r#"<table class="form-table">"#,
                r#"<tr><th scope="row"><label for="default_capacity">{capacity_label}</label></th>"#,
                r#"<td><input name="default_capacity" type="number" id="default_capacity" value="{capacity}" class="small-text"></td></tr>"#,
                r#"<tr><th scope="row"><label for="date_format">{format_label}</label></th>"#,
                r#"<td><input name="date_format" type="text" id="date_format" value="{format}" class="regular-text"></td></tr>"#,
                r#"<tr><th scope="row">{badge_label}</th>"#,
                r#"<td><label for="show_virtual_badge"><input name="show_virtual_badge" type="checkbox" id="show_virtual_badge"{checked}> {badge_text}</label></td></tr>"#,
                r#"</table>"#
            ),
            capacity_label = escape_html(&t("Default capacity")),
            capacity = snapshot.default_capacity,
            format_label = escape_html(&t("Date format")),
            format = escape_html(&snapshot.date_format),
            badge_label = escape_html(&t("Virtual badge")),
            badge_text = escape_html(&t("Show a badge on virtual events")),
            checked = checked,
        )
    }
}
