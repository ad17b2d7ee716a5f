use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute precision, written as `HH:MM`.
///
/// Work calendars and bookings only ever talk about slot start times, so
/// this stores minutes since midnight and orders by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotTime(u16);

impl SlotTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, ModelError> {
        if hour >= 24 || minute >= 60 {
            return Err(ModelError::InvalidTime(format!("{:02}:{:02}", hour, minute)));
        }
        Ok(Self((hour * 60 + minute) as u16))
    }

    pub fn from_minutes(minutes: u32) -> Result<Self, ModelError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ModelError::InvalidTime(format!("{} minutes", minutes)));
        }
        Ok(Self(minutes as u16))
    }

    /// Minutes elapsed since midnight.
    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_num_seconds_from_midnight_opt(self.minutes() * 60, 0).unwrap_or_default()
    }

    /// Combine with a calendar date into a wall-clock instant.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for SlotTime {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // chrono accepts single-digit hours; calendars store zero-padded HH:MM only
        if trimmed.len() != 5 || trimmed.as_bytes()[2] != b':' {
            return Err(ModelError::InvalidTime(s.to_string()));
        }
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| ModelError::InvalidTime(s.to_string()))?;
        Ok(Self::from(time))
    }
}

impl From<NaiveTime> for SlotTime {
    fn from(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl TryFrom<String> for SlotTime {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SlotTime> for String {
    fn from(value: SlotTime) -> Self {
        value.to_string()
    }
}

/// Coarse part-of-day filter offered next to the slot grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    #[default]
    Any,
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn matches(self, slot: SlotTime) -> bool {
        let hour = slot.hour();
        match self {
            TimeOfDay::Any => true,
            TimeOfDay::Morning => hour < 12,
            TimeOfDay::Afternoon => (12..17).contains(&hour),
            TimeOfDay::Evening => hour >= 17,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_and_display() {
        let slot: SlotTime = "09:30".parse().unwrap();
        assert_eq!(slot.minutes(), 570);
        assert_eq!(slot.to_string(), "09:30");
    }

    #[test]
    fn test_rejects_malformed_times() {
        assert_matches!("9:30".parse::<SlotTime>(), Err(ModelError::InvalidTime(_)));
        assert_matches!("24:00".parse::<SlotTime>(), Err(ModelError::InvalidTime(_)));
        assert_matches!("12:60".parse::<SlotTime>(), Err(ModelError::InvalidTime(_)));
        assert_matches!("noon!".parse::<SlotTime>(), Err(ModelError::InvalidTime(_)));
    }

    #[test]
    fn test_serde_uses_hh_mm_strings() {
        let slot = SlotTime::new(18, 0).unwrap();
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"18:00\"");

        let parsed: SlotTime = serde_json::from_str("\"07:05\"").unwrap();
        assert_eq!(parsed, SlotTime::new(7, 5).unwrap());
        assert!(serde_json::from_str::<SlotTime>("\"7:5\"").is_err());
    }

    #[test]
    fn test_time_of_day_boundaries() {
        let at = |s: &str| s.parse::<SlotTime>().unwrap();

        assert!(TimeOfDay::Morning.matches(at("11:59")));
        assert!(!TimeOfDay::Morning.matches(at("12:00")));
        assert!(TimeOfDay::Afternoon.matches(at("12:00")));
        assert!(TimeOfDay::Afternoon.matches(at("16:59")));
        assert!(!TimeOfDay::Afternoon.matches(at("17:00")));
        assert!(TimeOfDay::Evening.matches(at("17:00")));
        assert!(TimeOfDay::Any.matches(at("03:00")));
    }
}
