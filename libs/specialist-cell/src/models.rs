use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{LocalizedString, ModelError, SlotTime};

use crate::services::rating::recompute_rating;

/// Declared slot start times per calendar date.
///
/// A date mapped to an empty set is a day off; a date with no entry has no
/// declared schedule. Neither yields bookable slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkSchedule(BTreeMap<NaiveDate, BTreeSet<SlotTime>>);

impl WorkSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, date: NaiveDate, slots: impl IntoIterator<Item = SlotTime>) -> Self {
        self.0.insert(date, slots.into_iter().collect());
        self
    }

    pub fn slots_on(&self, date: NaiveDate) -> Option<&BTreeSet<SlotTime>> {
        self.0.get(&date)
    }

    pub fn has_day(&self, date: NaiveDate) -> bool {
        self.0.contains_key(&date)
    }

    pub fn contains(&self, date: NaiveDate, slot: SlotTime) -> bool {
        self.0.get(&date).is_some_and(|slots| slots.contains(&slot))
    }

    /// Replace the whole day. Returns the slots that were declared before.
    pub fn replace_day(&mut self, date: NaiveDate, slots: BTreeSet<SlotTime>) -> Option<BTreeSet<SlotTime>> {
        self.0.insert(date, slots)
    }

    pub fn add_slot(&mut self, date: NaiveDate, slot: SlotTime) -> bool {
        self.0.entry(date).or_default().insert(slot)
    }

    pub fn remove_slot(&mut self, date: NaiveDate, slot: SlotTime) -> bool {
        self.0
            .get_mut(&date)
            .is_some_and(|slots| slots.remove(&slot))
    }

    /// Turn the date into a day off. The date key is kept.
    pub fn clear_day(&mut self, date: NaiveDate) {
        self.0.insert(date, BTreeSet::new());
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.0.keys()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Booking the review was left for. Seeded reviews may have none.
    pub booking_id: Option<Uuid>,
    pub rating: u8,
    pub comment: String,
    /// `false` while pending moderation.
    pub is_moderated: bool,
}

impl Review {
    pub fn new(user_id: Uuid, booking_id: Option<Uuid>, rating: u8, comment: &str) -> Result<Self, SpecialistError> {
        if !(1..=5).contains(&rating) {
            return Err(SpecialistError::InvalidRating(rating));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            booking_id,
            rating,
            comment: comment.trim().to_string(),
            is_moderated: false,
        })
    }

    pub fn approved(mut self) -> Self {
        self.is_moderated = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: Uuid,
    pub name: String,
    pub bio: LocalizedString,
    pub avatar: Option<String>,
    /// Mirrors `Service::specialist_ids`; only the directory's service
    /// bookkeeping writes it.
    pub(crate) service_ids: Vec<Uuid>,
    pub work_schedule: WorkSchedule,
    pub access_key: String,
    rating: f64,
    reviews: Vec<Review>,
}

impl Specialist {
    pub fn new(name: &str, bio: LocalizedString, access_key: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bio,
            avatar: None,
            service_ids: Vec::new(),
            work_schedule: WorkSchedule::new(),
            access_key: access_key.to_string(),
            rating: 0.0,
            reviews: Vec::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = Some(avatar.to_string());
        self
    }

    pub fn with_schedule(mut self, work_schedule: WorkSchedule) -> Self {
        self.work_schedule = work_schedule;
        self
    }

    /// Attach existing reviews; the rating is derived from them.
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.rating = recompute_rating(&reviews);
        self.reviews = reviews;
        self
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review(&self, review_id: Uuid) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id == review_id)
    }

    pub fn offers(&self, service_id: Uuid) -> bool {
        self.service_ids.contains(&service_id)
    }

    pub(crate) fn reviews_mut(&mut self) -> &mut Vec<Review> {
        &mut self.reviews
    }

    pub(crate) fn set_rating(&mut self, rating: f64) {
        self.rating = rating;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<LocalizedString>,
    pub avatar: Option<String>,
    pub access_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleRequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl ScheduleRequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ScheduleRequestStatus::Pending)
    }
}

impl fmt::Display for ScheduleRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleRequestStatus::Pending => write!(f, "pending"),
            ScheduleRequestStatus::Approved => write!(f, "approved"),
            ScheduleRequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleChangeRequest {
    pub id: Uuid,
    pub specialist_id: Uuid,
    pub specialist_name: String,
    pub date: NaiveDate,
    /// Empty means the specialist asks for the day off.
    pub requested_slots: BTreeSet<SlotTime>,
    pub reason: String,
    pub status: ScheduleRequestStatus,
}

/// Pending "clear the whole day" edit, waiting for the admin to confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearDayProposal {
    pub specialist_id: Uuid,
    pub date: NaiveDate,
    pub discarded: BTreeSet<SlotTime>,
}

/// Pending review deletion, waiting for the admin to confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRejectionProposal {
    pub specialist_id: Uuid,
    pub review_id: Uuid,
    pub rating: u8,
}

/// A review together with the specialist it belongs to, for moderation queues.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewListing {
    pub specialist_id: Uuid,
    pub specialist_name: String,
    pub review: Review,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecialistError {
    #[error("Specialist not found: {0}")]
    NotFound(Uuid),

    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    #[error("Schedule change request not found: {0}")]
    RequestNotFound(Uuid),

    #[error("Schedule change request {id} is already {status}")]
    RequestAlreadyResolved { id: Uuid, status: ScheduleRequestStatus },

    #[error("Schedule change request {request_id} does not belong to specialist {specialist_id}")]
    RequestSpecialistMismatch { request_id: Uuid, specialist_id: Uuid },

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Access key is already used by another specialist")]
    DuplicateAccessKey,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(text: &str) -> NaiveDate {
        NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap()
    }

    fn at(text: &str) -> SlotTime {
        text.parse().unwrap()
    }

    #[test]
    fn test_clear_day_keeps_the_key() {
        let mut schedule = WorkSchedule::new().with_day(day("2024-08-06"), [at("09:00"), at("10:00")]);
        schedule.clear_day(day("2024-08-06"));

        assert!(schedule.has_day(day("2024-08-06")));
        assert_eq!(schedule.slots_on(day("2024-08-06")).map(|s| s.len()), Some(0));
    }

    #[test]
    fn test_add_slot_deduplicates() {
        let mut schedule = WorkSchedule::new();
        assert!(schedule.add_slot(day("2024-08-05"), at("11:00")));
        assert!(!schedule.add_slot(day("2024-08-05"), at("11:00")));
        assert!(schedule.remove_slot(day("2024-08-05"), at("11:00")));
        assert!(!schedule.remove_slot(day("2024-08-07"), at("11:00")));
    }

    #[test]
    fn test_schedule_serializes_as_date_map() {
        let schedule = WorkSchedule::new().with_day(day("2024-08-05"), [at("12:00"), at("10:00")]);
        let json = serde_json::to_value(&schedule).unwrap();

        assert_eq!(json, serde_json::json!({ "2024-08-05": ["10:00", "12:00"] }));

        let back: WorkSchedule = serde_json::from_value(json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn test_review_rating_bounds() {
        assert!(Review::new(Uuid::new_v4(), None, 0, "").is_err());
        assert!(Review::new(Uuid::new_v4(), None, 6, "").is_err());
        assert!(!Review::new(Uuid::new_v4(), None, 5, "Great").unwrap().is_moderated);
    }
}
