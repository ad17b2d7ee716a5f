pub mod catalog;
pub mod publication;

pub use catalog::ServiceCatalog;
pub use publication::PublicationBoard;
