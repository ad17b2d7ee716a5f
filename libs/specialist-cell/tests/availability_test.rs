use shared_config::SchedulingConfig;
use shared_models::{BookingStatus, TimeOfDay};
use shared_utils::test_utils::{date, localized, slot, slots, TestBooking, TestService};
use specialist_cell::{OccupiedInterval, SlotCalculator, Specialist, WorkSchedule};

fn calculator() -> SlotCalculator {
    SlotCalculator::new(&SchedulingConfig::default())
}

fn specialist_with_day(day: &str, times: &[&str]) -> Specialist {
    Specialist::new("Anna", localized("bio"), "anna-key")
        .with_schedule(WorkSchedule::new().with_day(date(day), slots(times)))
}

#[test]
fn test_existing_booking_blocks_overlapping_start() {
    let anna = specialist_with_day("2024-08-05", &["10:00", "11:00", "12:00"]);
    let massage = TestService::new("Massage", 50).offered_by(&[anna.id]).to_service();
    let existing = TestBooking::new(anna.id, massage.id, "2024-08-05", "10:00").to_booking();

    let available = calculator().available_slots(
        &anna,
        date("2024-08-05"),
        30,
        &[existing],
        &[massage],
    );

    assert_eq!(available, slots(&["11:00", "12:00"]));
}

#[test]
fn test_last_slot_must_fit_nominal_hour() {
    let anna = specialist_with_day("2024-08-05", &["17:00", "18:00"]);

    let available = calculator().available_slots(&anna, date("2024-08-05"), 55, &[], &[]);
    assert_eq!(available, slots(&["17:00"]));

    // 50 + 10 buffer fills the final hour exactly
    let available = calculator().available_slots(&anna, date("2024-08-05"), 50, &[], &[]);
    assert_eq!(available, slots(&["17:00", "18:00"]));
}

#[test]
fn test_adjacent_booking_is_allowed() {
    let anna = specialist_with_day("2024-08-05", &["10:00", "11:00"]);
    let facial = TestService::new("Facial", 50).to_service();
    let existing = TestBooking::new(anna.id, facial.id, "2024-08-05", "11:00").to_booking();

    // [10:00, 11:00) ends exactly where the existing booking starts
    let available = calculator().available_slots(&anna, date("2024-08-05"), 50, &[existing], &[facial]);
    assert_eq!(available, slots(&["10:00"]));
}

#[test]
fn test_cancelled_bookings_free_their_time() {
    let anna = specialist_with_day("2024-08-05", &["10:00", "11:00"]);
    let facial = TestService::new("Facial", 50).to_service();
    let cancelled = TestBooking::new(anna.id, facial.id, "2024-08-05", "10:00")
        .with_status(BookingStatus::Cancelled)
        .to_booking();
    let completed = TestBooking::new(anna.id, facial.id, "2024-08-05", "11:00")
        .with_status(BookingStatus::Completed)
        .to_booking();

    let available = calculator().available_slots(
        &anna,
        date("2024-08-05"),
        50,
        &[cancelled, completed],
        &[facial],
    );
    assert_eq!(available, slots(&["10:00"]));
}

#[test]
fn test_missing_service_uses_fallback_duration() {
    let anna = specialist_with_day("2024-08-05", &["10:00", "11:00", "12:00"]);
    let orphan = TestBooking::new(anna.id, uuid::Uuid::new_v4(), "2024-08-05", "10:00").to_booking();

    let intervals = calculator().occupied_intervals(anna.id, date("2024-08-05"), &[orphan.clone()], &[]);
    assert_eq!(intervals, vec![OccupiedInterval { start: 600, end: 670 }]);

    // [11:00, 11:40) would start before the orphan's block ends at 11:10
    let available = calculator().available_slots(&anna, date("2024-08-05"), 30, &[orphan], &[]);
    assert_eq!(available, slots(&["12:00"]));
}

#[test]
fn test_other_specialists_and_dates_are_ignored() {
    let anna = specialist_with_day("2024-08-05", &["10:00"]);
    let service = TestService::new("Nails", 60).to_service();
    let elsewhere = vec![
        TestBooking::new(uuid::Uuid::new_v4(), service.id, "2024-08-05", "10:00").to_booking(),
        TestBooking::new(anna.id, service.id, "2024-08-06", "10:00").to_booking(),
    ];

    let available = calculator().available_slots(&anna, date("2024-08-05"), 45, &elsewhere, &[service]);
    assert_eq!(available, slots(&["10:00"]));
}

#[test]
fn test_day_off_and_undeclared_day_are_empty() {
    let anna = Specialist::new("Anna", localized("bio"), "anna-key")
        .with_schedule(WorkSchedule::new().with_day(date("2024-08-11"), []));

    assert!(calculator().available_slots(&anna, date("2024-08-11"), 30, &[], &[]).is_empty());
    assert!(calculator().available_slots(&anna, date("2024-08-12"), 30, &[], &[]).is_empty());
}

#[test]
fn test_repeated_queries_are_identical() {
    let anna = specialist_with_day("2024-08-05", &["12:00", "08:00", "10:00", "09:00"]);
    let calc = calculator();

    let first = calc.available_slots(&anna, date("2024-08-05"), 45, &[], &[]);
    let second = calc.available_slots(&anna, date("2024-08-05"), 45, &[], &[]);

    assert_eq!(first, second);
    assert_eq!(first, slots(&["08:00", "09:00", "10:00", "12:00"]));
}

#[test]
fn test_is_slot_available_requires_declared_start() {
    let anna = specialist_with_day("2024-08-05", &["10:00", "11:00"]);
    let calc = calculator();

    assert!(calc.is_slot_available(&anna, date("2024-08-05"), slot("10:00"), 45, &[], &[]));
    assert!(!calc.is_slot_available(&anna, date("2024-08-05"), slot("10:30"), 45, &[], &[]));
    assert!(!calc.is_slot_available(&anna, date("2024-08-06"), slot("10:00"), 45, &[], &[]));
}

#[test]
fn test_time_of_day_filter() {
    let all = slots(&["09:00", "12:00", "16:00", "17:00", "18:00"]);

    assert_eq!(SlotCalculator::filter_by_time_of_day(&all, TimeOfDay::Morning), slots(&["09:00"]));
    assert_eq!(
        SlotCalculator::filter_by_time_of_day(&all, TimeOfDay::Afternoon),
        slots(&["12:00", "16:00"])
    );
    assert_eq!(
        SlotCalculator::filter_by_time_of_day(&all, TimeOfDay::Evening),
        slots(&["17:00", "18:00"])
    );
    assert_eq!(SlotCalculator::filter_by_time_of_day(&all, TimeOfDay::Any), all);
}

#[test]
fn test_buffer_comes_from_config() {
    let config = SchedulingConfig {
        booking_buffer_minutes: 0,
        ..SchedulingConfig::default()
    };
    let anna = specialist_with_day("2024-08-05", &["18:00"]);

    let available = SlotCalculator::new(&config).available_slots(&anna, date("2024-08-05"), 60, &[], &[]);
    assert_eq!(available, slots(&["18:00"]));
}

#[test]
fn test_oversized_duration_never_fits() {
    let anna = specialist_with_day("2024-08-05", &["10:00"]);
    let calculator = calculator();

    let interval = calculator.occupied_interval(slot("10:00"), u32::MAX - 100);
    assert_eq!(interval, OccupiedInterval { start: 600, end: u32::MAX });

    let available = calculator.available_slots(&anna, date("2024-08-05"), u32::MAX - 100, &[], &[]);
    assert!(available.is_empty());
    assert!(!calculator.is_slot_available(&anna, date("2024-08-05"), slot("10:00"), u32::MAX, &[], &[]));
}
