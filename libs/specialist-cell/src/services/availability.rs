use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::SchedulingConfig;
use shared_models::{Booking, Service, SlotTime, TimeOfDay};

use crate::models::Specialist;

/// Half-open `[start, end)` range in minutes since midnight. `end` may run
/// past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedInterval {
    pub start: u32,
    pub end: u32,
}

impl OccupiedInterval {
    /// Touching intervals (one ends exactly where the other starts) do not overlap.
    pub fn overlaps(&self, other: &OccupiedInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Computes bookable start times from a declared work calendar and the
/// bookings already on it. Holds no state besides the scheduling constants.
#[derive(Debug, Clone)]
pub struct SlotCalculator {
    buffer_minutes: u32,
    nominal_slot_minutes: u32,
    fallback_service_minutes: u32,
}

impl SlotCalculator {
    pub fn new(config: &SchedulingConfig) -> Self {
        Self {
            buffer_minutes: config.booking_buffer_minutes,
            nominal_slot_minutes: config.nominal_slot_minutes,
            fallback_service_minutes: config.fallback_service_minutes,
        }
    }

    pub fn occupied_interval(&self, start: SlotTime, duration_minutes: u32) -> OccupiedInterval {
        OccupiedInterval {
            start: start.minutes(),
            end: start
                .minutes()
                .saturating_add(duration_minutes)
                .saturating_add(self.buffer_minutes),
        }
    }

    /// Intervals blocked by the specialist's non-cancelled bookings on `date`.
    pub fn occupied_intervals(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
        bookings: &[Booking],
        services: &[Service],
    ) -> Vec<OccupiedInterval> {
        bookings
            .iter()
            .filter(|booking| {
                booking.specialist_id == specialist_id
                    && booking.date == date
                    && booking.occupies_calendar()
            })
            .map(|booking| {
                let duration = match services.iter().find(|s| s.id == booking.service_id) {
                    Some(service) => service.duration_minutes,
                    None => {
                        warn!(
                            "Booking {} references unknown service {}, assuming {} minutes",
                            booking.id, booking.service_id, self.fallback_service_minutes
                        );
                        self.fallback_service_minutes
                    }
                };
                self.occupied_interval(booking.time, duration)
            })
            .collect()
    }

    /// The last declared start opens the final nominal block of the day.
    pub fn end_of_workday(&self, declared: &BTreeSet<SlotTime>) -> Option<u32> {
        declared
            .iter()
            .next_back()
            .map(|last| last.minutes().saturating_add(self.nominal_slot_minutes))
    }

    fn fits(
        &self,
        start: SlotTime,
        duration_minutes: u32,
        end_of_day: u32,
        occupied: &[OccupiedInterval],
    ) -> bool {
        let candidate = self.occupied_interval(start, duration_minutes);
        candidate.end <= end_of_day && !occupied.iter().any(|taken| taken.overlaps(&candidate))
    }

    /// Declared starts at which a booking of `duration_minutes` can begin,
    /// ascending.
    pub fn compute_slots(
        &self,
        declared: &BTreeSet<SlotTime>,
        occupied: &[OccupiedInterval],
        duration_minutes: u32,
    ) -> Vec<SlotTime> {
        let Some(end_of_day) = self.end_of_workday(declared) else {
            return Vec::new();
        };

        declared
            .iter()
            .copied()
            .filter(|start| self.fits(*start, duration_minutes, end_of_day, occupied))
            .collect()
    }

    pub fn available_slots(
        &self,
        specialist: &Specialist,
        date: NaiveDate,
        duration_minutes: u32,
        bookings: &[Booking],
        services: &[Service],
    ) -> Vec<SlotTime> {
        debug!(
            "Computing slots for specialist {} on {} ({} min)",
            specialist.id, date, duration_minutes
        );

        let Some(declared) = specialist.work_schedule.slots_on(date) else {
            return Vec::new();
        };

        let occupied = self.occupied_intervals(specialist.id, date, bookings, services);
        self.compute_slots(declared, &occupied, duration_minutes)
    }

    /// Confirmation-time check for one exact start time.
    pub fn is_slot_available(
        &self,
        specialist: &Specialist,
        date: NaiveDate,
        time: SlotTime,
        duration_minutes: u32,
        bookings: &[Booking],
        services: &[Service],
    ) -> bool {
        let Some(declared) = specialist.work_schedule.slots_on(date) else {
            return false;
        };
        if !declared.contains(&time) {
            return false;
        }
        let Some(end_of_day) = self.end_of_workday(declared) else {
            return false;
        };

        let occupied = self.occupied_intervals(specialist.id, date, bookings, services);
        self.fits(time, duration_minutes, end_of_day, &occupied)
    }

    pub fn filter_by_time_of_day(slots: &[SlotTime], filter: TimeOfDay) -> Vec<SlotTime> {
        slots.iter().copied().filter(|slot| filter.matches(*slot)).collect()
    }
}
