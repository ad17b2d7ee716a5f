use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::SlotTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    /// Always a concrete specialist; "any" is resolved before a booking exists.
    pub specialist_id: Uuid,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub status: BookingStatus,
    #[serde(default)]
    pub review_submitted: bool,
}

impl Booking {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.time.on(self.date)
    }

    /// Cancelled bookings release their time; everything else blocks it.
    pub fn occupies_calendar(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Still confirmed and not yet started. Everything else is history for
    /// display purposes; this never changes the status.
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.status == BookingStatus::Confirmed && self.starts_at() >= now
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}
