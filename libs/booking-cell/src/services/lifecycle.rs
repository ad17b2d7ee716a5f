use chrono::{Duration, NaiveDateTime};
use tracing::{debug, info, warn};

use shared_config::SchedulingConfig;
use shared_models::{Booking, BookingStatus};

use crate::models::{BookingError, CancellationProposal};

pub struct BookingLifecycleService {
    min_cancellation_notice_hours: i64,
}

impl BookingLifecycleService {
    pub fn new(config: &SchedulingConfig) -> Self {
        Self {
            min_cancellation_notice_hours: config.min_cancellation_notice_hours,
        }
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: &BookingStatus,
        new_status: &BookingStatus,
    ) -> Result<(), BookingError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(BookingError::InvalidStatusTransition {
                from: *current_status,
                to: *new_status,
            });
        }

        Ok(())
    }

    /// Get all valid next statuses for a given current status
    pub fn get_valid_transitions(&self, current_status: &BookingStatus) -> Vec<BookingStatus> {
        if current_status.is_terminal() {
            return Vec::new();
        }
        vec![BookingStatus::Cancelled, BookingStatus::Completed]
    }

    pub fn time_until_start(&self, booking: &Booking, now: NaiveDateTime) -> Duration {
        booking.starts_at() - now
    }

    /// Apply the notice window. Exactly the minimum notice is still allowed.
    pub fn check_cancellation_window(
        &self,
        booking: &Booking,
        now: NaiveDateTime,
    ) -> Result<CancellationProposal, BookingError> {
        self.validate_status_transition(&booking.status, &BookingStatus::Cancelled)?;

        let remaining = self.time_until_start(booking, now);
        if remaining < Duration::hours(self.min_cancellation_notice_hours) {
            warn!(
                "Cancellation of booking {} refused, only {} minutes left",
                booking.id,
                remaining.num_minutes()
            );
            return Err(BookingError::CancellationPolicy {
                minutes_until_start: remaining.num_minutes(),
                required_hours: self.min_cancellation_notice_hours,
            });
        }

        info!("Cancellation of booking {} permitted, awaiting confirmation", booking.id);
        Ok(CancellationProposal {
            booking_id: booking.id,
            starts_at: booking.starts_at(),
            minutes_until_start: remaining.num_minutes(),
        })
    }

    pub fn can_review(&self, booking: &Booking) -> Result<(), BookingError> {
        if booking.status != BookingStatus::Completed {
            return Err(BookingError::ReviewNotAllowed(format!(
                "booking is {}, not completed",
                booking.status
            )));
        }
        if booking.review_submitted {
            return Err(BookingError::ReviewNotAllowed(
                "a review was already submitted".to_string(),
            ));
        }
        Ok(())
    }
}
