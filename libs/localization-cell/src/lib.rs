pub mod authoring;
pub mod messages;
pub mod translator;

pub use authoring::{translate_fields, AuthoringForm, TranslationTicket};
pub use messages::{Localizer, MessageCatalog};
pub use translator::{
    error_placeholders, offline_placeholders, HttpTranslator, TranslationError, Translator,
};
