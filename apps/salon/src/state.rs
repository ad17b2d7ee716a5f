use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use booking_cell::{
    BookingService, CancellationProposal, CreateBookingRequest, ReviewSubmission, SpecialistSelection,
};
use catalog_cell::{
    PublicationBoard, PublicationDraft, Publication, ServiceCatalog, ServiceDeletionProposal, ServiceDraft,
};
use localization_cell::{HttpTranslator, Localizer, MessageCatalog};
use shared_config::AppConfig;
use shared_models::{Booking, Language, Role, Service, SlotTime, TimeOfDay, User};
use specialist_cell::{
    parse_requested_slots, ClearDayProposal, ReviewRejectionProposal, ScheduleChangeRequest,
    ScheduleChangeWorkflow, ScheduleDecision, Specialist, SpecialistDirectory, UpdateProfileRequest,
};

use crate::error::SalonError;

/// Every collection the salon works with, owned in one place.
///
/// Mutating methods take `&mut self`, so check-then-write sequences such as
/// creating a booking or approving a calendar change cannot interleave. Share
/// it across threads behind a single `Mutex`.
pub struct SalonState {
    config: AppConfig,
    default_language: Language,
    messages: Arc<MessageCatalog>,
    users: Vec<User>,
    catalog: ServiceCatalog,
    directory: SpecialistDirectory,
    bookings: BookingService,
    schedule_requests: ScheduleChangeWorkflow,
    publications: PublicationBoard,
}

impl SalonState {
    pub fn new(config: AppConfig) -> Self {
        let default_language = config.default_language.parse().unwrap_or_else(|err| {
            warn!("{}, falling back to {}", err, Language::default());
            Language::default()
        });
        let bookings = BookingService::new(&config.scheduling);

        Self {
            config,
            default_language,
            messages: Arc::new(MessageCatalog::with_defaults()),
            users: Vec::new(),
            catalog: ServiceCatalog::new(),
            directory: SpecialistDirectory::new(),
            bookings,
            schedule_requests: ScheduleChangeWorkflow::new(),
            publications: PublicationBoard::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &SpecialistDirectory {
        &self.directory
    }

    pub fn bookings(&self) -> &BookingService {
        &self.bookings
    }

    pub fn schedule_requests(&self) -> &ScheduleChangeWorkflow {
        &self.schedule_requests
    }

    pub fn publications(&self) -> &PublicationBoard {
        &self.publications
    }

    pub fn localizer(&self, language: Language) -> Localizer {
        Localizer::new(Arc::clone(&self.messages), language, self.default_language)
    }

    pub fn translator(&self) -> HttpTranslator {
        HttpTranslator::new(&self.config)
    }

    // Users and access

    pub fn add_user(&mut self, user: User) -> Uuid {
        let id = user.id;
        debug!("Registered {} user {}", user.role, user.name);
        self.users.push(user);
        id
    }

    pub fn user(&self, user_id: Uuid) -> Result<&User, SalonError> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or(SalonError::UserNotFound(user_id))
    }

    /// Admin key from configuration, or a specialist's own access key.
    pub fn authenticate(&self, access_key: &str) -> Option<&User> {
        if self.config.is_admin_login_enabled() && access_key == self.config.admin_access_key {
            return self.users.iter().find(|u| u.role == Role::Admin);
        }

        let specialist = self.directory.find_by_access_key(access_key)?;
        let user = self
            .users
            .iter()
            .find(|u| u.acting_specialist() == Some(specialist.id));
        if user.is_none() {
            warn!("Specialist {} has an access key but no user account", specialist.id);
        }
        user
    }

    fn require_admin(&self, user_id: Uuid) -> Result<&User, SalonError> {
        let user = self.user(user_id)?;
        if !user.is_admin() {
            warn!("User {} attempted an admin action", user_id);
            return Err(SalonError::Forbidden(format!("{} is not an admin", user.name)));
        }
        Ok(user)
    }

    fn require_booking_owner(&self, user_id: Uuid, booking_id: Uuid) -> Result<(), SalonError> {
        let user = self.user(user_id)?;
        let booking = self
            .bookings
            .get(booking_id)
            .ok_or(booking_cell::BookingError::NotFound(booking_id))?;

        if booking.user_id != user_id && !user.is_admin() {
            return Err(SalonError::Forbidden(format!(
                "booking {} belongs to another user",
                booking_id
            )));
        }
        Ok(())
    }

    // Browsing and booking

    pub fn available_slots(
        &self,
        service_id: Uuid,
        selection: SpecialistSelection,
        date: NaiveDate,
        filter: TimeOfDay,
    ) -> Result<Vec<SlotTime>, SalonError> {
        Ok(self.bookings.available_slots(
            &self.directory,
            self.catalog.all(),
            service_id,
            selection,
            date,
            filter,
        )?)
    }

    pub fn book(
        &mut self,
        user_id: Uuid,
        service_id: Uuid,
        selection: SpecialistSelection,
        date: NaiveDate,
        time: SlotTime,
    ) -> Result<Booking, SalonError> {
        self.user(user_id)?;
        let request = CreateBookingRequest {
            user_id,
            service_id,
            selection,
            date,
            time,
        };
        Ok(self
            .bookings
            .create_booking(request, &self.directory, self.catalog.all())?)
    }

    pub fn propose_cancellation(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
        now: NaiveDateTime,
    ) -> Result<CancellationProposal, SalonError> {
        self.require_booking_owner(user_id, booking_id)?;
        Ok(self.bookings.propose_cancellation(booking_id, now)?)
    }

    pub fn confirm_cancellation(
        &mut self,
        user_id: Uuid,
        proposal: CancellationProposal,
        now: NaiveDateTime,
    ) -> Result<Booking, SalonError> {
        self.require_booking_owner(user_id, proposal.booking_id)?;
        Ok(self.bookings.confirm_cancellation(proposal, now)?)
    }

    pub fn submit_review(
        &mut self,
        user_id: Uuid,
        booking_id: Uuid,
        rating: u8,
        comment: &str,
    ) -> Result<Uuid, SalonError> {
        self.user(user_id)?;
        let submission = ReviewSubmission {
            user_id,
            rating,
            comment: comment.to_string(),
        };
        Ok(self
            .bookings
            .add_review(booking_id, submission, &mut self.directory)?)
    }

    pub fn mark_completed(&mut self, admin_id: Uuid, booking_id: Uuid) -> Result<Booking, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.bookings.mark_completed(booking_id)?)
    }

    // Schedule change requests

    /// A specialist asks for a new calendar day. `slots` is the comma
    /// separated list typed into the request form; empty means a day off.
    pub fn submit_schedule_request(
        &mut self,
        user_id: Uuid,
        date: NaiveDate,
        slots: &str,
        reason: &str,
    ) -> Result<ScheduleChangeRequest, SalonError> {
        let user = self.user(user_id)?;
        let Some(specialist_id) = user.acting_specialist() else {
            return Err(SalonError::Forbidden(format!("{} is not a specialist", user.name)));
        };

        let requested = parse_requested_slots(slots)?;
        let specialist = self.directory.require(specialist_id)?;
        Ok(self
            .schedule_requests
            .submit(specialist, date, requested, reason))
    }

    pub fn resolve_schedule_request(
        &mut self,
        admin_id: Uuid,
        request_id: Uuid,
        decision: ScheduleDecision,
    ) -> Result<ScheduleChangeRequest, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self
            .schedule_requests
            .resolve(request_id, decision, &mut self.directory)?)
    }

    // Direct calendar edits

    pub fn add_work_slot(
        &mut self,
        admin_id: Uuid,
        specialist_id: Uuid,
        date: NaiveDate,
        slot: SlotTime,
    ) -> Result<bool, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.add_work_slot(specialist_id, date, slot)?)
    }

    pub fn remove_work_slot(
        &mut self,
        admin_id: Uuid,
        specialist_id: Uuid,
        date: NaiveDate,
        slot: SlotTime,
    ) -> Result<bool, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.remove_work_slot(specialist_id, date, slot)?)
    }

    pub fn propose_clear_day(
        &self,
        admin_id: Uuid,
        specialist_id: Uuid,
        date: NaiveDate,
    ) -> Result<ClearDayProposal, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.propose_clear_day(specialist_id, date)?)
    }

    pub fn commit_clear_day(&mut self, admin_id: Uuid, proposal: ClearDayProposal) -> Result<(), SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.commit_clear_day(proposal)?)
    }

    // Review moderation

    pub fn approve_review(&mut self, admin_id: Uuid, specialist_id: Uuid, review_id: Uuid) -> Result<f64, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.approve_review(specialist_id, review_id)?)
    }

    pub fn unapprove_review(&mut self, admin_id: Uuid, specialist_id: Uuid, review_id: Uuid) -> Result<f64, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.unapprove_review(specialist_id, review_id)?)
    }

    pub fn propose_review_rejection(
        &self,
        admin_id: Uuid,
        specialist_id: Uuid,
        review_id: Uuid,
    ) -> Result<ReviewRejectionProposal, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.propose_review_rejection(specialist_id, review_id)?)
    }

    pub fn commit_review_rejection(
        &mut self,
        admin_id: Uuid,
        proposal: ReviewRejectionProposal,
    ) -> Result<f64, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.commit_review_rejection(proposal)?)
    }

    // Catalog management

    pub fn add_specialist(&mut self, admin_id: Uuid, specialist: Specialist) -> Result<Uuid, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.add_specialist(specialist)?)
    }

    pub fn update_specialist(
        &mut self,
        admin_id: Uuid,
        specialist_id: Uuid,
        update: UpdateProfileRequest,
    ) -> Result<Specialist, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.directory.update_profile(specialist_id, update)?.clone())
    }

    /// Adds the service and records it on every listed specialist.
    pub fn add_service(&mut self, admin_id: Uuid, draft: ServiceDraft) -> Result<Service, SalonError> {
        self.require_admin(admin_id)?;
        for specialist_id in &draft.specialist_ids {
            self.directory.require(*specialist_id)?;
        }

        let service = self.catalog.add_service(draft)?;
        for specialist_id in &service.specialist_ids {
            self.directory.set_offers(*specialist_id, service.id, true)?;
        }
        Ok(service)
    }

    pub fn update_service(
        &mut self,
        admin_id: Uuid,
        service_id: Uuid,
        draft: ServiceDraft,
    ) -> Result<Service, SalonError> {
        self.require_admin(admin_id)?;
        for specialist_id in &draft.specialist_ids {
            self.directory.require(*specialist_id)?;
        }

        let service = self.catalog.update_service(service_id, draft)?;
        self.directory.forget_service(service_id);
        for specialist_id in &service.specialist_ids {
            self.directory.set_offers(*specialist_id, service_id, true)?;
        }
        Ok(service)
    }

    pub fn toggle_service_specialist(
        &mut self,
        admin_id: Uuid,
        service_id: Uuid,
        specialist_id: Uuid,
    ) -> Result<bool, SalonError> {
        self.require_admin(admin_id)?;
        self.directory.require(specialist_id)?;

        let offered = self.catalog.toggle_specialist(service_id, specialist_id)?;
        self.directory.set_offers(specialist_id, service_id, offered)?;
        Ok(offered)
    }

    pub fn propose_service_deletion(
        &self,
        admin_id: Uuid,
        service_id: Uuid,
    ) -> Result<ServiceDeletionProposal, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.catalog.propose_deletion(service_id)?)
    }

    /// Existing bookings keep the id; their duration falls back to the
    /// configured default from now on.
    pub fn commit_service_deletion(
        &mut self,
        admin_id: Uuid,
        proposal: ServiceDeletionProposal,
    ) -> Result<Service, SalonError> {
        self.require_admin(admin_id)?;
        let removed = self.catalog.commit_deletion(proposal)?;
        self.directory.forget_service(removed.id);
        info!("Service {} removed from every specialist", removed.id);
        Ok(removed)
    }

    pub fn publish(&mut self, admin_id: Uuid, draft: PublicationDraft) -> Result<Publication, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.publications.publish(draft)?)
    }

    pub fn update_publication(
        &mut self,
        admin_id: Uuid,
        publication_id: Uuid,
        draft: PublicationDraft,
    ) -> Result<Publication, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.publications.update(publication_id, draft)?)
    }

    pub fn propose_publication_deletion(&self, admin_id: Uuid, publication_id: Uuid) -> Result<Uuid, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.publications.propose_deletion(publication_id)?)
    }

    pub fn commit_publication_deletion(
        &mut self,
        admin_id: Uuid,
        publication_id: Uuid,
    ) -> Result<Publication, SalonError> {
        self.require_admin(admin_id)?;
        Ok(self.publications.commit_deletion(publication_id)?)
    }

    /// Replace the booking store, used when loading existing bookings.
    pub(crate) fn restore_bookings(&mut self, bookings: Vec<Booking>) {
        info!("Loaded {} bookings", bookings.len());
        self.bookings = BookingService::with_bookings(&self.config.scheduling, bookings);
    }
}
