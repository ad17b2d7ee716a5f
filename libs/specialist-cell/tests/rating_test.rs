use assert_matches::assert_matches;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use shared_utils::test_utils::localized;
use specialist_cell::{Review, Specialist, SpecialistDirectory, SpecialistError};

struct Fixture {
    directory: SpecialistDirectory,
    specialist_id: Uuid,
    five: Uuid,
    three: Uuid,
    four: Uuid,
}

fn fixture() -> Fixture {
    let five = Review::new(Uuid::new_v4(), None, 5, "Wonderful").unwrap().approved();
    let three = Review::new(Uuid::new_v4(), None, 3, "Fine").unwrap();
    let four = Review::new(Uuid::new_v4(), None, 4, "Good").unwrap().approved();
    let (five_id, three_id, four_id) = (five.id, three.id, four.id);

    let specialist = Specialist::new("Anna", localized("bio"), "anna-key")
        .with_reviews(vec![five, three, four]);
    let specialist_id = specialist.id;

    Fixture {
        directory: SpecialistDirectory::with_specialists(vec![specialist]),
        specialist_id,
        five: five_id,
        three: three_id,
        four: four_id,
    }
}

fn rating(directory: &SpecialistDirectory, id: Uuid) -> f64 {
    directory.require(id).unwrap().rating()
}

#[test]
fn test_initial_rating_uses_moderated_reviews_only() {
    let f = fixture();
    assert_eq!(rating(&f.directory, f.specialist_id), 4.5);
}

#[test]
fn test_moderation_sequence_recomputes_each_step() {
    let mut f = fixture();

    let after_unapprove = assert_ok!(f.directory.unapprove_review(f.specialist_id, f.five));
    assert_eq!(after_unapprove, 4.0);
    assert_eq!(rating(&f.directory, f.specialist_id), 4.0);

    let proposal = assert_ok!(f.directory.propose_review_rejection(f.specialist_id, f.four));
    // nothing changes until the admin confirms
    assert_eq!(rating(&f.directory, f.specialist_id), 4.0);

    let after_reject = assert_ok!(f.directory.commit_review_rejection(proposal));
    assert_eq!(after_reject, 0.0);

    let specialist = f.directory.require(f.specialist_id).unwrap();
    assert_eq!(specialist.reviews().len(), 2);
    assert!(specialist.review(f.four).is_none());
}

#[test]
fn test_approving_pending_review_counts_it() {
    let mut f = fixture();

    let after = assert_ok!(f.directory.approve_review(f.specialist_id, f.three));
    assert_eq!(after, 4.0);
    assert!(f.directory.pending_reviews().is_empty());
    assert_eq!(f.directory.approved_reviews().len(), 3);
}

#[test]
fn test_append_review_does_not_touch_rating() {
    let mut f = fixture();
    let review = Review::new(Uuid::new_v4(), Some(Uuid::new_v4()), 1, "Late").unwrap().approved();

    let review_id = assert_ok!(f.directory.append_review(f.specialist_id, review));

    assert_eq!(rating(&f.directory, f.specialist_id), 4.5);
    let pending = f.directory.pending_reviews();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().any(|listing| listing.review.id == review_id));
    assert_eq!(pending[0].specialist_name, "Anna");
}

#[test]
fn test_unknown_review_and_specialist() {
    let mut f = fixture();

    assert_matches!(
        f.directory.approve_review(f.specialist_id, Uuid::new_v4()),
        Err(SpecialistError::ReviewNotFound(_))
    );
    assert_matches!(
        f.directory.approve_review(Uuid::new_v4(), f.three),
        Err(SpecialistError::NotFound(_))
    );
    assert_eq!(rating(&f.directory, f.specialist_id), 4.5);
}

#[test]
fn test_rejection_confirmed_twice_fails_second_time() {
    let mut f = fixture();

    let proposal = assert_ok!(f.directory.propose_review_rejection(f.specialist_id, f.three));
    assert_ok!(f.directory.commit_review_rejection(proposal.clone()));

    let err = assert_err!(f.directory.commit_review_rejection(proposal));
    assert_matches!(err, SpecialistError::ReviewNotFound(id) if id == f.three);
}
