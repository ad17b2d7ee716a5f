use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::SchedulingConfig;
use shared_models::{Booking, Service, SlotTime, TimeOfDay};
use specialist_cell::{SlotCalculator, Specialist, SpecialistDirectory};

use crate::models::{BookingError, SpecialistSelection};

/// Everything a slot lookup reads, borrowed from the current state.
#[derive(Debug, Clone, Copy)]
pub struct CalendarView<'a> {
    pub directory: &'a SpecialistDirectory,
    pub bookings: &'a [Booking],
    pub services: &'a [Service],
}

impl<'a> CalendarView<'a> {
    pub fn new(directory: &'a SpecialistDirectory, bookings: &'a [Booking], services: &'a [Service]) -> Self {
        Self { directory, bookings, services }
    }

    pub fn service(&self, service_id: Uuid) -> Result<&'a Service, BookingError> {
        self.services
            .iter()
            .find(|s| s.id == service_id)
            .ok_or(BookingError::ServiceNotFound(service_id))
    }
}

pub struct AvailabilityResolver {
    calculator: SlotCalculator,
}

impl AvailabilityResolver {
    pub fn new(config: &SchedulingConfig) -> Self {
        Self {
            calculator: SlotCalculator::new(config),
        }
    }

    pub fn calculator(&self) -> &SlotCalculator {
        &self.calculator
    }

    fn eligible_specialist<'a>(
        &self,
        view: &CalendarView<'a>,
        service: &Service,
        specialist_id: Uuid,
    ) -> Result<&'a Specialist, BookingError> {
        let specialist = view
            .directory
            .get(specialist_id)
            .ok_or(BookingError::SpecialistNotFound(specialist_id))?;

        if !service.is_offered_by(specialist_id) {
            warn!("Specialist {} is not eligible for service {}", specialist_id, service.id);
            return Err(BookingError::SpecialistNotEligible {
                specialist_id,
                service_id: service.id,
            });
        }
        Ok(specialist)
    }

    /// Slots for one named specialist.
    pub fn specialist_slots(
        &self,
        view: &CalendarView<'_>,
        service: &Service,
        specialist_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SlotTime>, BookingError> {
        let specialist = self.eligible_specialist(view, service, specialist_id)?;
        Ok(self.calculator.available_slots(
            specialist,
            date,
            service.duration_minutes,
            view.bookings,
            view.services,
        ))
    }

    /// Union over every eligible specialist, for display. A listed time only
    /// means somebody was free when this was computed.
    pub fn any_slots(&self, view: &CalendarView<'_>, service: &Service, date: NaiveDate) -> Vec<SlotTime> {
        let union: BTreeSet<SlotTime> = view
            .directory
            .eligible_for(service)
            .into_iter()
            .flat_map(|specialist| {
                self.calculator.available_slots(
                    specialist,
                    date,
                    service.duration_minutes,
                    view.bookings,
                    view.services,
                )
            })
            .collect();

        union.into_iter().collect()
    }

    pub fn query(
        &self,
        view: &CalendarView<'_>,
        service: &Service,
        selection: SpecialistSelection,
        date: NaiveDate,
        filter: TimeOfDay,
    ) -> Result<Vec<SlotTime>, BookingError> {
        debug!("Slot query for service {} on {} ({:?}, {:?})", service.id, date, selection, filter);

        let slots = match selection {
            SpecialistSelection::Specific(id) => self.specialist_slots(view, service, id, date)?,
            SpecialistSelection::Any => self.any_slots(view, service, date),
        };
        Ok(SlotCalculator::filter_by_time_of_day(&slots, filter))
    }

    /// Pick the specialist who will actually take the booking.
    ///
    /// For `Any` this is the first specialist in the service's list for whom
    /// the exact slot is still free, so identical inputs always give the same
    /// answer.
    pub fn resolve(
        &self,
        view: &CalendarView<'_>,
        service: &Service,
        selection: SpecialistSelection,
        date: NaiveDate,
        time: SlotTime,
    ) -> Result<Uuid, BookingError> {
        let free = |specialist: &Specialist| {
            self.calculator.is_slot_available(
                specialist,
                date,
                time,
                service.duration_minutes,
                view.bookings,
                view.services,
            )
        };

        match selection {
            SpecialistSelection::Specific(id) => {
                let specialist = self.eligible_specialist(view, service, id)?;
                if !free(specialist) {
                    warn!("Slot {} on {} no longer free for specialist {}", time, date, id);
                    return Err(BookingError::SlotNotAvailable { date, time });
                }
                Ok(id)
            }
            SpecialistSelection::Any => {
                let chosen = view
                    .directory
                    .eligible_for(service)
                    .into_iter()
                    .find(|specialist| free(*specialist));

                match chosen {
                    Some(specialist) => {
                        info!("Resolved any-specialist booking at {} {} to {}", date, time, specialist.name);
                        Ok(specialist.id)
                    }
                    None => {
                        warn!("No specialist free for service {} at {} {}", service.id, date, time);
                        Err(BookingError::NoSpecialistAvailable { date, time })
                    }
                }
            }
        }
    }
}
