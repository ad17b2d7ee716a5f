use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_config::SchedulingConfig;
use shared_models::{Booking, BookingStatus, Service, SlotTime, TimeOfDay};
use specialist_cell::{Review, SpecialistDirectory};

use crate::models::{
    BookingError, CancellationProposal, CreateBookingRequest, ReviewSubmission, SpecialistSelection,
};
use crate::services::lifecycle::BookingLifecycleService;
use crate::services::resolver::{AvailabilityResolver, CalendarView};

/// Cancel a single booking outside of any store. Returns the cancelled copy.
pub fn cancel_booking(
    booking: &Booking,
    now: NaiveDateTime,
    config: &SchedulingConfig,
) -> Result<Booking, BookingError> {
    BookingLifecycleService::new(config).check_cancellation_window(booking, now)?;
    Ok(Booking {
        status: BookingStatus::Cancelled,
        ..booking.clone()
    })
}

/// Owns every booking and is the only place that creates or changes one.
pub struct BookingService {
    bookings: Vec<Booking>,
    resolver: AvailabilityResolver,
    lifecycle: BookingLifecycleService,
}

impl BookingService {
    pub fn new(config: &SchedulingConfig) -> Self {
        Self::with_bookings(config, Vec::new())
    }

    pub fn with_bookings(config: &SchedulingConfig, bookings: Vec<Booking>) -> Self {
        Self {
            bookings,
            resolver: AvailabilityResolver::new(config),
            lifecycle: BookingLifecycleService::new(config),
        }
    }

    pub fn resolver(&self) -> &AvailabilityResolver {
        &self.resolver
    }

    pub fn lifecycle(&self) -> &BookingLifecycleService {
        &self.lifecycle
    }

    pub fn available_slots(
        &self,
        directory: &SpecialistDirectory,
        services: &[Service],
        service_id: Uuid,
        selection: SpecialistSelection,
        date: NaiveDate,
        filter: TimeOfDay,
    ) -> Result<Vec<SlotTime>, BookingError> {
        let view = CalendarView::new(directory, &self.bookings, services);
        let service = view.service(service_id)?;
        self.resolver.query(&view, service, selection, date, filter)
    }

    /// Re-validates the slot against the bookings held right now, then stores
    /// a confirmed booking. Nothing is stored on refusal.
    pub fn create_booking(
        &mut self,
        request: CreateBookingRequest,
        directory: &SpecialistDirectory,
        services: &[Service],
    ) -> Result<Booking, BookingError> {
        debug!(
            "Creating booking for user {} service {} at {} {}",
            request.user_id, request.service_id, request.date, request.time
        );

        let specialist_id = {
            let view = CalendarView::new(directory, &self.bookings, services);
            let service = view.service(request.service_id)?;
            self.resolver
                .resolve(&view, service, request.selection, request.date, request.time)?
        };

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            service_id: request.service_id,
            specialist_id,
            date: request.date,
            time: request.time,
            status: BookingStatus::Confirmed,
            review_submitted: false,
        };
        self.bookings.push(booking.clone());

        info!(
            "Booking {} confirmed with specialist {} at {} {}",
            booking.id, specialist_id, booking.date, booking.time
        );
        Ok(booking)
    }

    pub fn propose_cancellation(
        &self,
        booking_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<CancellationProposal, BookingError> {
        let booking = self.require(booking_id)?;
        self.lifecycle.check_cancellation_window(booking, now)
    }

    /// Second phase. The window is checked again against `now`.
    pub fn confirm_cancellation(
        &mut self,
        proposal: CancellationProposal,
        now: NaiveDateTime,
    ) -> Result<Booking, BookingError> {
        let index = self.index_of(proposal.booking_id)?;
        self.lifecycle
            .check_cancellation_window(&self.bookings[index], now)?;

        let booking = &mut self.bookings[index];
        booking.status = BookingStatus::Cancelled;
        info!("Booking {} cancelled", booking.id);
        Ok(booking.clone())
    }

    pub fn mark_completed(&mut self, booking_id: Uuid) -> Result<Booking, BookingError> {
        let index = self.index_of(booking_id)?;
        self.lifecycle
            .validate_status_transition(&self.bookings[index].status, &BookingStatus::Completed)?;

        let booking = &mut self.bookings[index];
        booking.status = BookingStatus::Completed;
        info!("Booking {} completed", booking.id);
        Ok(booking.clone())
    }

    /// Attach an unmoderated review to the booking's specialist. Returns the
    /// new review id.
    pub fn add_review(
        &mut self,
        booking_id: Uuid,
        submission: ReviewSubmission,
        directory: &mut SpecialistDirectory,
    ) -> Result<Uuid, BookingError> {
        let index = self.index_of(booking_id)?;
        let booking = &self.bookings[index];

        if booking.user_id != submission.user_id {
            warn!("User {} tried to review booking {} of another user", submission.user_id, booking_id);
            return Err(BookingError::ReviewNotAllowed(
                "booking belongs to another user".to_string(),
            ));
        }
        self.lifecycle.can_review(booking)?;

        let review = Review::new(
            submission.user_id,
            Some(booking_id),
            submission.rating,
            &submission.comment,
        )?;
        let review_id = directory.append_review(booking.specialist_id, review)?;

        self.bookings[index].review_submitted = true;
        Ok(review_id)
    }

    pub fn get(&self, booking_id: Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == booking_id)
    }

    pub fn all(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn for_user(&self, user_id: Uuid) -> Vec<&Booking> {
        let mut bookings: Vec<&Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .collect();
        bookings.sort_by_key(|b| b.starts_at());
        bookings
    }

    pub fn upcoming_for_user(&self, user_id: Uuid, now: NaiveDateTime) -> Vec<&Booking> {
        self.for_user(user_id)
            .into_iter()
            .filter(|b| b.is_upcoming(now))
            .collect()
    }

    /// Cancelled, completed, and confirmed bookings whose start has passed.
    pub fn history_for_user(&self, user_id: Uuid, now: NaiveDateTime) -> Vec<&Booking> {
        self.for_user(user_id)
            .into_iter()
            .filter(|b| !b.is_upcoming(now))
            .collect()
    }

    fn require(&self, booking_id: Uuid) -> Result<&Booking, BookingError> {
        self.get(booking_id).ok_or(BookingError::NotFound(booking_id))
    }

    fn index_of(&self, booking_id: Uuid) -> Result<usize, BookingError> {
        self.bookings
            .iter()
            .position(|b| b.id == booking_id)
            .ok_or(BookingError::NotFound(booking_id))
    }
}
