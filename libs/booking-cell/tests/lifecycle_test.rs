use assert_matches::assert_matches;
use chrono::Duration;
use uuid::Uuid;

use booking_cell::{cancel_booking, BookingError, BookingLifecycleService};
use shared_config::SchedulingConfig;
use shared_models::BookingStatus;
use shared_utils::test_utils::{at, TestBooking};

fn lifecycle() -> BookingLifecycleService {
    BookingLifecycleService::new(&SchedulingConfig::default())
}

#[test]
fn test_valid_transitions() {
    let lifecycle = lifecycle();

    assert_eq!(
        lifecycle.get_valid_transitions(&BookingStatus::Confirmed),
        vec![BookingStatus::Cancelled, BookingStatus::Completed]
    );
    assert!(lifecycle.get_valid_transitions(&BookingStatus::Cancelled).is_empty());
    assert!(lifecycle.get_valid_transitions(&BookingStatus::Completed).is_empty());

    assert!(lifecycle
        .validate_status_transition(&BookingStatus::Confirmed, &BookingStatus::Completed)
        .is_ok());
    assert_matches!(
        lifecycle.validate_status_transition(&BookingStatus::Completed, &BookingStatus::Cancelled),
        Err(BookingError::InvalidStatusTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Cancelled
        })
    );
}

#[test]
fn test_cancellation_notice_boundaries() {
    let booking = TestBooking::new(Uuid::new_v4(), Uuid::new_v4(), "2024-08-10", "12:00").to_booking();
    let start = at("2024-08-10", "12:00");
    let config = SchedulingConfig::default();

    let too_late = start - (Duration::hours(23) + Duration::minutes(59));
    assert_matches!(
        cancel_booking(&booking, too_late, &config),
        Err(BookingError::CancellationPolicy { minutes_until_start: 1439, required_hours: 24 })
    );

    let in_time = start - (Duration::hours(24) + Duration::minutes(1));
    let cancelled = cancel_booking(&booking, in_time, &config).unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.id, booking.id);

    let exactly = start - Duration::hours(24);
    assert!(cancel_booking(&booking, exactly, &config).is_ok());
}

#[test]
fn test_cannot_cancel_twice() {
    let booking = TestBooking::new(Uuid::new_v4(), Uuid::new_v4(), "2024-08-10", "12:00")
        .with_status(BookingStatus::Cancelled)
        .to_booking();

    assert_matches!(
        cancel_booking(&booking, at("2024-08-01", "12:00"), &SchedulingConfig::default()),
        Err(BookingError::InvalidStatusTransition { from: BookingStatus::Cancelled, .. })
    );
}

#[test]
fn test_review_requires_completed_unreviewed_booking() {
    let lifecycle = lifecycle();
    let mut booking = TestBooking::new(Uuid::new_v4(), Uuid::new_v4(), "2024-08-10", "12:00").to_booking();

    assert_matches!(lifecycle.can_review(&booking), Err(BookingError::ReviewNotAllowed(_)));

    booking.status = BookingStatus::Completed;
    assert!(lifecycle.can_review(&booking).is_ok());

    booking.review_submitted = true;
    assert_matches!(lifecycle.can_review(&booking), Err(BookingError::ReviewNotAllowed(_)));
}

#[test]
fn test_notice_window_comes_from_config() {
    let config = SchedulingConfig {
        min_cancellation_notice_hours: 2,
        ..SchedulingConfig::default()
    };
    let booking = TestBooking::new(Uuid::new_v4(), Uuid::new_v4(), "2024-08-10", "12:00").to_booking();

    assert!(cancel_booking(&booking, at("2024-08-10", "09:00"), &config).is_ok());
    assert!(cancel_booking(&booking, at("2024-08-10", "10:30"), &config).is_err());
}
