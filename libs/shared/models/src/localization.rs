use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    Sr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::Sr];

    pub fn code(self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Sr => "sr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "sr" => Ok(Language::Sr),
            other => Err(ModelError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Text kept in every language the salon publishes in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalizedString {
    pub ru: String,
    pub en: String,
    pub sr: String,
}

impl LocalizedString {
    pub fn new(ru: impl Into<String>, en: impl Into<String>, sr: impl Into<String>) -> Self {
        Self {
            ru: ru.into(),
            en: en.into(),
            sr: sr.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Ru => &self.ru,
            Language::En => &self.en,
            Language::Sr => &self.sr,
        }
    }

    pub fn set(&mut self, language: Language, text: impl Into<String>) {
        let slot = match language {
            Language::Ru => &mut self.ru,
            Language::En => &mut self.en,
            Language::Sr => &mut self.sr,
        };
        *slot = text.into();
    }

    /// Text for `language`, or the `fallback` language's text when the
    /// requested one was never filled in.
    pub fn resolve(&self, language: Language, fallback: Language) -> &str {
        let text = self.get(language);
        if text.trim().is_empty() {
            self.get(fallback)
        } else {
            text
        }
    }

    pub fn is_complete(&self) -> bool {
        Language::ALL.iter().all(|lang| !self.get(*lang).trim().is_empty())
    }
}
