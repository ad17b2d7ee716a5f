use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid time of day '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unsupported language code: {0}")]
    UnsupportedLanguage(String),

    #[error("Localized field '{0}' must be filled in for every language")]
    IncompleteLocalization(&'static str),

    #[error("Price must be a positive amount")]
    InvalidPrice,

    #[error("Duration must be between 1 and 1440 minutes")]
    InvalidDuration,

    #[error("Validation error: {0}")]
    Validation(String),
}
