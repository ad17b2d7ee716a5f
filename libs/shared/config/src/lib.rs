use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Constants that drive slot calculation and the cancellation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingConfig {
    /// Gap enforced after every booking before the next one may start.
    pub booking_buffer_minutes: u32,
    /// Length of the block that starts at the last declared slot of a day.
    pub nominal_slot_minutes: u32,
    pub min_cancellation_notice_hours: i64,
    /// Duration assumed for a booking whose service is no longer in the catalog.
    pub fallback_service_minutes: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            booking_buffer_minutes: 10,
            nominal_slot_minutes: 60,
            min_cancellation_notice_hours: 24,
            fallback_service_minutes: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub scheduling: SchedulingConfig,
    pub default_language: String,
    pub admin_access_key: String,
    pub translation_api_url: String,
    pub translation_api_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduling: SchedulingConfig::default(),
            default_language: "ru".to_string(),
            admin_access_key: String::new(),
            translation_api_url: String::new(),
            translation_api_key: String::new(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = SchedulingConfig::default();

        let config = Self {
            scheduling: SchedulingConfig {
                booking_buffer_minutes: parse_or_default(
                    "SALON_BOOKING_BUFFER_MINUTES",
                    defaults.booking_buffer_minutes,
                ),
                nominal_slot_minutes: parse_or_default(
                    "SALON_NOMINAL_SLOT_MINUTES",
                    defaults.nominal_slot_minutes,
                ),
                min_cancellation_notice_hours: parse_or_default(
                    "SALON_CANCELLATION_NOTICE_HOURS",
                    defaults.min_cancellation_notice_hours,
                ),
                fallback_service_minutes: parse_or_default(
                    "SALON_FALLBACK_SERVICE_MINUTES",
                    defaults.fallback_service_minutes,
                ),
            },
            default_language: env::var("SALON_DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| {
                    warn!("SALON_DEFAULT_LANGUAGE not set, using default");
                    "ru".to_string()
                }),
            admin_access_key: env::var("SALON_ADMIN_ACCESS_KEY")
                .unwrap_or_else(|_| {
                    warn!("SALON_ADMIN_ACCESS_KEY not set, admin login disabled");
                    String::new()
                }),
            translation_api_url: env::var("TRANSLATION_API_URL")
                .unwrap_or_else(|_| {
                    warn!("TRANSLATION_API_URL not set, using empty value");
                    String::new()
                }),
            translation_api_key: env::var("TRANSLATION_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("TRANSLATION_API_KEY not set, using empty value");
                    String::new()
                }),
        };

        if !config.is_translation_configured() {
            warn!("Translation assist not configured - authoring forms will use placeholder text");
        }

        config
    }

    pub fn is_translation_configured(&self) -> bool {
        !self.translation_api_url.is_empty() && !self.translation_api_key.is_empty()
    }

    pub fn is_admin_login_enabled(&self) -> bool {
        !self.admin_access_key.is_empty()
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_defaults() {
        let scheduling = SchedulingConfig::default();
        assert_eq!(scheduling.booking_buffer_minutes, 10);
        assert_eq!(scheduling.nominal_slot_minutes, 60);
        assert_eq!(scheduling.min_cancellation_notice_hours, 24);
    }

    #[test]
    fn test_translation_requires_url_and_key() {
        let mut config = AppConfig::default();
        assert!(!config.is_translation_configured());

        config.translation_api_url = "http://localhost:9000/translate".to_string();
        assert!(!config.is_translation_configured());

        config.translation_api_key = "key".to_string();
        assert!(config.is_translation_configured());
    }

    #[test]
    fn test_invalid_env_value_falls_back() {
        env::set_var("SALON_TEST_PARSE_FALLBACK", "ten");
        assert_eq!(parse_or_default("SALON_TEST_PARSE_FALLBACK", 10u32), 10);
        env::set_var("SALON_TEST_PARSE_FALLBACK", " 15 ");
        assert_eq!(parse_or_default("SALON_TEST_PARSE_FALLBACK", 10u32), 15);
    }
}
