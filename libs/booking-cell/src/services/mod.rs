pub mod booking;
pub mod lifecycle;
pub mod resolver;

pub use booking::{cancel_booking, BookingService};
pub use lifecycle::BookingLifecycleService;
pub use resolver::{AvailabilityResolver, CalendarView};
