use std::collections::{BTreeMap, HashMap};

use futures::future::join_all;
use tracing::{debug, info};

use shared_models::{Language, LocalizedString};

use crate::translator::Translator;

/// Identifies one in-flight translation for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationTicket {
    field: String,
    generation: u64,
}

impl TranslationTicket {
    pub fn field(&self) -> &str {
        &self.field
    }
}

/// Localized fields of an admin form (service, publication, bio) while it
/// is being edited.
///
/// Translations arrive asynchronously. A result is only applied if the form
/// is still open and no newer translation was started for the same field.
#[derive(Debug, Clone)]
pub struct AuthoringForm {
    fields: BTreeMap<String, LocalizedString>,
    latest: HashMap<String, u64>,
    next_generation: u64,
    open: bool,
}

impl Default for AuthoringForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthoringForm {
    pub fn new() -> Self {
        Self {
            fields: BTreeMap::new(),
            latest: HashMap::new(),
            next_generation: 0,
            open: true,
        }
    }

    pub fn with_field(mut self, name: &str, value: LocalizedString) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&LocalizedString> {
        self.fields.get(name)
    }

    pub fn set_text(&mut self, name: &str, language: Language, text: &str) {
        self.fields
            .entry(name.to_string())
            .or_default()
            .set(language, text);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        debug!("Authoring form closed, {} translations dropped", self.latest.len());
        self.open = false;
        self.latest.clear();
    }

    pub fn begin_translation(&mut self, field: &str) -> TranslationTicket {
        self.next_generation += 1;
        self.latest.insert(field.to_string(), self.next_generation);
        TranslationTicket {
            field: field.to_string(),
            generation: self.next_generation,
        }
    }

    /// Returns `false` when the result arrived too late to be used.
    pub fn apply_translation(&mut self, ticket: TranslationTicket, value: LocalizedString) -> bool {
        if !self.open {
            debug!("Ignoring translation for '{}': form closed", ticket.field);
            return false;
        }
        if self.latest.get(&ticket.field) != Some(&ticket.generation) {
            debug!("Ignoring stale translation for '{}'", ticket.field);
            return false;
        }

        self.latest.remove(&ticket.field);
        self.fields.insert(ticket.field, value);
        true
    }

    pub fn into_fields(self) -> BTreeMap<String, LocalizedString> {
        self.fields
    }
}

/// Translate several fields concurrently and apply every result that is
/// still wanted. Returns how many fields were updated.
pub async fn translate_fields<T>(
    form: &mut AuthoringForm,
    translator: &T,
    source: Language,
    requests: &[(&str, &str)],
) -> usize
where
    T: Translator + ?Sized,
{
    let tickets: Vec<TranslationTicket> = requests
        .iter()
        .map(|(field, _)| form.begin_translation(field))
        .collect();

    let results = join_all(
        requests
            .iter()
            .map(|(_, text)| translator.translate(text, source)),
    )
    .await;

    let applied = tickets
        .into_iter()
        .zip(results)
        .map(|(ticket, value)| form.apply_translation(ticket, value))
        .filter(|applied| *applied)
        .count();

    info!("Applied {} of {} translations", applied, requests.len());
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::{offline_placeholders, MockTranslator};
    use mockall::predicate::{eq, function};

    #[tokio::test]
    async fn test_translate_fields_uses_translator_per_field() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .with(function(|text: &str| text == "Masaža"), eq(Language::Sr))
            .times(1)
            .returning(|_, _| LocalizedString::new("Массаж", "Massage", "Masaža"));
        translator
            .expect_translate()
            .with(function(|text: &str| text == "Opuštanje"), eq(Language::Sr))
            .times(1)
            .returning(|text, source| offline_placeholders(text, source));

        let mut form = AuthoringForm::new();
        let applied = translate_fields(
            &mut form,
            &translator,
            Language::Sr,
            &[("name", "Masaža"), ("description", "Opuštanje")],
        )
        .await;

        assert_eq!(applied, 2);
        assert_eq!(form.field("name").map(|f| f.en.as_str()), Some("Massage"));
        assert_eq!(form.field("description").map(|f| f.ru.as_str()), Some("[RU] Opuštanje"));
    }

    #[tokio::test]
    async fn test_closed_form_ignores_translations() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|text, source| offline_placeholders(text, source));

        let mut form = AuthoringForm::new().with_field("title", LocalizedString::new("", "", "Akcija"));
        form.close();

        let applied = translate_fields(&mut form, &translator, Language::Sr, &[("title", "Akcija")]).await;

        assert_eq!(applied, 0);
        assert_eq!(form.field("title").map(|f| f.en.as_str()), Some(""));
    }

    #[test]
    fn test_newer_request_wins() {
        let mut form = AuthoringForm::new();
        let first = form.begin_translation("name");
        let second = form.begin_translation("name");

        assert!(form.apply_translation(second, LocalizedString::new("b", "b", "b")));
        assert!(!form.apply_translation(first, LocalizedString::new("a", "a", "a")));
        assert_eq!(form.field("name").map(|f| f.ru.as_str()), Some("b"));
    }
}
