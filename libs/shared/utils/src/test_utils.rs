use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use shared_config::{AppConfig, SchedulingConfig};
use shared_models::{Booking, BookingStatus, LocalizedString, Service, SlotTime};

pub struct TestConfig {
    pub booking_buffer_minutes: u32,
    pub nominal_slot_minutes: u32,
    pub min_cancellation_notice_hours: i64,
    pub admin_access_key: String,
    pub translation_api_url: String,
    pub translation_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            booking_buffer_minutes: 10,
            nominal_slot_minutes: 60,
            min_cancellation_notice_hours: 24,
            admin_access_key: "admin_pass".to_string(),
            translation_api_url: String::new(),
            translation_api_key: String::new(),
        }
    }
}

impl TestConfig {
    pub fn with_translation(url: &str, key: &str) -> Self {
        Self {
            translation_api_url: url.to_string(),
            translation_api_key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn scheduling(&self) -> SchedulingConfig {
        SchedulingConfig {
            booking_buffer_minutes: self.booking_buffer_minutes,
            nominal_slot_minutes: self.nominal_slot_minutes,
            min_cancellation_notice_hours: self.min_cancellation_notice_hours,
            ..SchedulingConfig::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            scheduling: self.scheduling(),
            default_language: "ru".to_string(),
            admin_access_key: self.admin_access_key.clone(),
            translation_api_url: self.translation_api_url.clone(),
            translation_api_key: self.translation_api_key.clone(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Parse an `HH:MM` fixture. Panics on bad input.
pub fn slot(text: &str) -> SlotTime {
    text.parse()
        .unwrap_or_else(|err| panic!("bad slot fixture {text}: {err}"))
}

pub fn slots(texts: &[&str]) -> Vec<SlotTime> {
    texts.iter().map(|text| slot(text)).collect()
}

/// Parse a `YYYY-MM-DD` fixture. Panics on bad input.
pub fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("bad date fixture {text}: {err}"))
}

pub fn at(day: &str, time: &str) -> NaiveDateTime {
    slot(time).on(date(day))
}

/// Same text in every language.
pub fn localized(text: &str) -> LocalizedString {
    LocalizedString::new(text, text, text)
}

pub struct TestService {
    pub name: String,
    pub price: u32,
    pub duration_minutes: u32,
    pub specialist_ids: Vec<Uuid>,
}

impl Default for TestService {
    fn default() -> Self {
        Self {
            name: "Test treatment".to_string(),
            price: 3000,
            duration_minutes: 60,
            specialist_ids: Vec::new(),
        }
    }
}

impl TestService {
    pub fn new(name: &str, duration_minutes: u32) -> Self {
        Self {
            name: name.to_string(),
            duration_minutes,
            ..Self::default()
        }
    }

    pub fn offered_by(mut self, specialist_ids: &[Uuid]) -> Self {
        self.specialist_ids = specialist_ids.to_vec();
        self
    }

    pub fn to_service(&self) -> Service {
        Service {
            id: Uuid::new_v4(),
            name: localized(&self.name),
            description: localized("Test description"),
            category: localized("Test category"),
            price: self.price,
            duration_minutes: self.duration_minutes,
            specialist_ids: self.specialist_ids.clone(),
            image: None,
        }
    }
}

pub struct TestBooking {
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub specialist_id: Uuid,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: BookingStatus,
}

impl TestBooking {
    pub fn new(specialist_id: Uuid, service_id: Uuid, day: &str, time: &str) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            service_id,
            specialist_id,
            date: date(day),
            time: slot(time),
            status: BookingStatus::Confirmed,
        }
    }

    pub fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn to_booking(&self) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id: self.user_id,
            service_id: self.service_id,
            specialist_id: self.specialist_id,
            date: self.date,
            time: self.time,
            status: self.status,
            review_submitted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = TestConfig::default().to_app_config();

        assert_eq!(config.scheduling.booking_buffer_minutes, 10);
        assert_eq!(config.scheduling.fallback_service_minutes, 60);
        assert!(config.is_admin_login_enabled());
        assert!(!config.is_translation_configured());
    }

    #[test]
    fn test_booking_fixture() {
        let specialist = Uuid::new_v4();
        let booking = TestBooking::new(specialist, Uuid::new_v4(), "2024-08-05", "10:00")
            .with_status(BookingStatus::Completed)
            .to_booking();

        assert_eq!(booking.specialist_id, specialist);
        assert_eq!(booking.starts_at(), at("2024-08-05", "10:00"));
        assert!(booking.occupies_calendar());
    }
}
