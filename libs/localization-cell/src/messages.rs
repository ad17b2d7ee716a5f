use std::collections::HashMap;
use std::sync::Arc;

use tracing::warn;

use shared_models::{Language, LocalizedString};

/// Key to per-language UI text. Texts may contain `{{name}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    entries: HashMap<String, LocalizedString>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages used by the booking, cancellation and schedule screens.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for (key, ru, en, sr) in [
            (
                "cancellationPolicy",
                "Отменить запись можно не позднее чем за 24 часа.",
                "Bookings can only be cancelled at least 24 hours in advance.",
                "Termin se može otkazati najkasnije 24 sata unapred.",
            ),
            (
                "confirmCancellation",
                "Вы уверены, что хотите отменить запись?",
                "Are you sure you want to cancel this booking?",
                "Da li ste sigurni da želite da otkažete termin?",
            ),
            (
                "noSpecialistAvailable",
                "К сожалению, на это время нет свободных мастеров.",
                "Sorry, no specialist is available at this time.",
                "Nažalost, nijedan stručnjak nije slobodan u ovo vreme.",
            ),
            (
                "noAvailableSlots",
                "Нет свободного времени на эту дату.",
                "No available slots on this date.",
                "Nema slobodnih termina za ovaj datum.",
            ),
            (
                "bookingDurationInfo",
                "Длительность процедуры: {{duration}} мин.",
                "Treatment duration: {{duration}} min.",
                "Trajanje tretmana: {{duration}} min.",
            ),
            (
                "bookingConfirmed",
                "Вы записаны к {{specialist}} на {{date}} в {{time}}.",
                "You are booked with {{specialist}} on {{date}} at {{time}}.",
                "Zakazani ste kod {{specialist}} {{date}} u {{time}}.",
            ),
            ("anySpecialist", "Любой мастер", "Any specialist", "Bilo koji stručnjak"),
            ("dayOff", "Выходной", "Day off", "Slobodan dan"),
            (
                "confirmClearDay",
                "Очистить все слоты на {{date}}?",
                "Clear all slots on {{date}}?",
                "Obrisati sve termine za {{date}}?",
            ),
            (
                "confirmRejectReview",
                "Удалить этот отзыв?",
                "Delete this review?",
                "Obrisati ovu recenziju?",
            ),
        ] {
            catalog.insert(key, LocalizedString::new(ru, en, sr));
        }
        catalog
    }

    pub fn insert(&mut self, key: &str, text: LocalizedString) {
        self.entries.insert(key.to_string(), text);
    }

    pub fn get(&self, key: &str) -> Option<&LocalizedString> {
        self.entries.get(key)
    }
}

/// Lookups for one chosen UI language.
#[derive(Debug, Clone)]
pub struct Localizer {
    catalog: Arc<MessageCatalog>,
    language: Language,
    default_language: Language,
}

impl Localizer {
    pub fn new(catalog: Arc<MessageCatalog>, language: Language, default_language: Language) -> Self {
        Self {
            catalog,
            language,
            default_language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Message for `key` with `{{name}}` placeholders filled from `params`.
    /// Unknown keys come back as the key itself.
    pub fn t(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(entry) = self.catalog.get(key) else {
            warn!("Missing message key: {}", key);
            return key.to_string();
        };

        params.iter().fold(
            entry.resolve(self.language, self.default_language).to_string(),
            |text, (name, value)| text.replace(&format!("{{{{{}}}}}", name), value),
        )
    }

    pub fn lt<'a>(&self, text: &'a LocalizedString) -> &'a str {
        text.resolve(self.language, self.default_language)
    }
}
