use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::FuturePolicy;
use crate::calendar::DATE_FORMAT;

use super::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: [&str; 3] = [
    "ui_color_enabled",
    "future_registration",
    "date_format",
];

/// User-configurable preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub future_registration: FuturePolicy,
    #[serde(default = "Config::default_date_format")]
    pub date_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color_enabled: Self::default_ui_color_enabled(),
            future_registration: FuturePolicy::default(),
            date_format: Self::default_date_format(),
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_date_format() -> String {
        DATE_FORMAT.into()
    }

    /// Formats a date with the configured display format.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "ui_color_enabled" => Some(self.ui_color_enabled.to_string()),
            "future_registration" => Some(self.future_registration.to_string()),
            "date_format" => Some(self.date_format.clone()),
            _ => None,
        }
    }

    /// Updates one preference from its text form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        };
        let value = value.trim();
        match key {
            "ui_color_enabled" => {
                self.ui_color_enabled = parse_flag(value)
                    .ok_or_else(|| invalid("expected true/false or on/off".into()))?;
            }
            "future_registration" => {
                self.future_registration = value.parse().map_err(invalid)?;
            }
            "date_format" => {
                if !is_usable_date_format(value) {
                    return Err(invalid("not a usable chrono date format".into()));
                }
                self.date_format = value.to_string();
            }
            _ => {
                return Err(invalid(format!(
                    "unknown key (expected one of: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn is_usable_date_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !format.is_empty() && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}
