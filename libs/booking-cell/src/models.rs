use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{BookingStatus, ModelError, SlotTime};
use specialist_cell::SpecialistError;

/// Who the client wants to see. `Any` never reaches a stored booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum SpecialistSelection {
    Specific(Uuid),
    Any,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub selection: SpecialistSelection,
    pub date: NaiveDate,
    pub time: SlotTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmission {
    pub user_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

/// Result of the first cancellation phase: the notice window was checked and
/// the client must now confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct CancellationProposal {
    pub booking_id: Uuid,
    pub starts_at: NaiveDateTime,
    pub minutes_until_start: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("Specialist not found: {0}")]
    SpecialistNotFound(Uuid),

    #[error("Specialist {specialist_id} does not perform service {service_id}")]
    SpecialistNotEligible { specialist_id: Uuid, service_id: Uuid },

    #[error("Slot {time} on {date} is not available")]
    SlotNotAvailable { date: NaiveDate, time: SlotTime },

    #[error("No specialist is available at {time} on {date}")]
    NoSpecialistAvailable { date: NaiveDate, time: SlotTime },

    #[error("Bookings can only be cancelled {required_hours}h in advance ({minutes_until_start} minutes left)")]
    CancellationPolicy { minutes_until_start: i64, required_hours: i64 },

    #[error("Booking cannot move from {from} to {to}")]
    InvalidStatusTransition { from: BookingStatus, to: BookingStatus },

    #[error("Review not allowed: {0}")]
    ReviewNotAllowed(String),

    #[error(transparent)]
    Specialist(#[from] SpecialistError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_wire_format() {
        let id = Uuid::new_v4();

        assert_eq!(
            serde_json::to_value(SpecialistSelection::Specific(id)).unwrap(),
            json!({ "type": "specific", "id": id })
        );
        assert_eq!(
            serde_json::to_value(SpecialistSelection::Any).unwrap(),
            json!({ "type": "any" })
        );

        let parsed: CreateBookingRequest = serde_json::from_value(json!({
            "user_id": id,
            "service_id": id,
            "selection": { "type": "any" },
            "date": "2024-08-05",
            "time": "10:30"
        }))
        .unwrap();
        assert_eq!(parsed.selection, SpecialistSelection::Any);
        assert_eq!(parsed.time.minutes(), 630);
    }
}
