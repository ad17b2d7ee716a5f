pub mod booking;
pub mod error;
pub mod localization;
pub mod service;
pub mod time;
pub mod user;

pub use booking::{Booking, BookingStatus};
pub use error::ModelError;
pub use localization::{Language, LocalizedString};
pub use service::{Service, MAX_DURATION_MINUTES};
pub use time::{SlotTime, TimeOfDay};
pub use user::{Role, User};
