pub mod availability;
pub mod directory;
pub mod rating;
pub mod schedule_change;

pub use availability::{OccupiedInterval, SlotCalculator};
pub use directory::SpecialistDirectory;
pub use rating::recompute_rating;
pub use schedule_change::{
    parse_requested_slots, resolve_schedule_request, submit_schedule_request,
    ScheduleChangeWorkflow,
};
