use uuid::Uuid;

use booking_cell::BookingError;
use catalog_cell::CatalogError;
use shared_models::ModelError;
use specialist_cell::SpecialistError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SalonError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Specialist(#[from] SpecialistError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
