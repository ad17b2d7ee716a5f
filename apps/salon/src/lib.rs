pub mod error;
pub mod seed;
pub mod state;

pub use error::SalonError;
pub use seed::{seed_demo_data, SeedHandles};
pub use state::SalonState;
