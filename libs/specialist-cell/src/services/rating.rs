use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Review, ReviewListing, ReviewRejectionProposal, SpecialistError};
use crate::services::directory::SpecialistDirectory;

/// Mean rating over moderated reviews, `0.0` when there are none.
pub fn recompute_rating(reviews: &[Review]) -> f64 {
    let (sum, count) = reviews
        .iter()
        .filter(|review| review.is_moderated)
        .fold((0u32, 0u32), |(sum, count), review| {
            (sum + u32::from(review.rating), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        f64::from(sum) / f64::from(count)
    }
}

// Moderation entry points. These are the only places a rating changes after
// construction.
impl SpecialistDirectory {
    fn set_moderated(
        &mut self,
        specialist_id: Uuid,
        review_id: Uuid,
        moderated: bool,
    ) -> Result<f64, SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        let review = specialist
            .reviews_mut()
            .iter_mut()
            .find(|review| review.id == review_id)
            .ok_or(SpecialistError::ReviewNotFound(review_id))?;
        review.is_moderated = moderated;

        let rating = recompute_rating(specialist.reviews());
        specialist.set_rating(rating);
        Ok(rating)
    }

    pub fn approve_review(&mut self, specialist_id: Uuid, review_id: Uuid) -> Result<f64, SpecialistError> {
        debug!("Approving review {} of specialist {}", review_id, specialist_id);
        let rating = self.set_moderated(specialist_id, review_id, true)?;
        info!("Review {} approved, specialist {} rating now {:.2}", review_id, specialist_id, rating);
        Ok(rating)
    }

    pub fn unapprove_review(&mut self, specialist_id: Uuid, review_id: Uuid) -> Result<f64, SpecialistError> {
        debug!("Unapproving review {} of specialist {}", review_id, specialist_id);
        let rating = self.set_moderated(specialist_id, review_id, false)?;
        info!("Review {} unapproved, specialist {} rating now {:.2}", review_id, specialist_id, rating);
        Ok(rating)
    }

    pub fn propose_review_rejection(
        &self,
        specialist_id: Uuid,
        review_id: Uuid,
    ) -> Result<ReviewRejectionProposal, SpecialistError> {
        let review = self
            .require(specialist_id)?
            .review(review_id)
            .ok_or(SpecialistError::ReviewNotFound(review_id))?;

        Ok(ReviewRejectionProposal {
            specialist_id,
            review_id,
            rating: review.rating,
        })
    }

    /// Deletes the review for good.
    pub fn commit_review_rejection(&mut self, proposal: ReviewRejectionProposal) -> Result<f64, SpecialistError> {
        let specialist = self.require_mut(proposal.specialist_id)?;
        let reviews = specialist.reviews_mut();
        let Some(index) = reviews.iter().position(|review| review.id == proposal.review_id) else {
            warn!("Review {} vanished before rejection was confirmed", proposal.review_id);
            return Err(SpecialistError::ReviewNotFound(proposal.review_id));
        };
        reviews.remove(index);

        let rating = recompute_rating(specialist.reviews());
        specialist.set_rating(rating);
        info!(
            "Review {} rejected, specialist {} rating now {:.2}",
            proposal.review_id, proposal.specialist_id, rating
        );
        Ok(rating)
    }

    /// Attach a fresh review. It starts unmoderated and leaves the rating alone.
    pub fn append_review(&mut self, specialist_id: Uuid, mut review: Review) -> Result<Uuid, SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        review.is_moderated = false;
        let review_id = review.id;
        specialist.reviews_mut().push(review);
        info!("Review {} added to specialist {}, awaiting moderation", review_id, specialist_id);
        Ok(review_id)
    }

    pub fn pending_reviews(&self) -> Vec<ReviewListing> {
        self.review_listings(false)
    }

    pub fn approved_reviews(&self) -> Vec<ReviewListing> {
        self.review_listings(true)
    }

    fn review_listings(&self, moderated: bool) -> Vec<ReviewListing> {
        self.all()
            .iter()
            .flat_map(|specialist| {
                specialist
                    .reviews()
                    .iter()
                    .filter(move |review| review.is_moderated == moderated)
                    .map(move |review| ReviewListing {
                        specialist_id: specialist.id,
                        specialist_name: specialist.name.clone(),
                        review: review.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, moderated: bool) -> Review {
        let review = Review::new(Uuid::new_v4(), None, rating, "").unwrap();
        if moderated {
            review.approved()
        } else {
            review
        }
    }

    #[test]
    fn test_no_moderated_reviews_is_zero() {
        assert_eq!(recompute_rating(&[]), 0.0);
        assert_eq!(recompute_rating(&[review(5, false)]), 0.0);
    }

    #[test]
    fn test_mean_ignores_pending_reviews() {
        let reviews = vec![review(5, true), review(3, false), review(4, true)];
        assert_eq!(recompute_rating(&reviews), 4.5);
    }
}
