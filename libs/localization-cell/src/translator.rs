use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use shared_config::AppConfig;
use shared_models::{Language, LocalizedString};

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("Translation service is not configured")]
    NotConfigured,

    #[error("Translation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Translation service returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Machine translation used while authoring localized content.
///
/// Never fails: when the service cannot be reached the result carries
/// marked placeholder text so the form can still be saved and fixed by hand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: Language) -> LocalizedString;
}

fn placeholders(text: &str, source: Language, suffix: &str) -> LocalizedString {
    let mut result = LocalizedString::default();
    for language in Language::ALL {
        if language == source {
            result.set(language, text);
        } else {
            let marker = language.code().to_ascii_uppercase();
            result.set(language, format!("[{}{}] {}", marker, suffix, text));
        }
    }
    result
}

/// `[EN] text` style output used when no translation service is configured.
pub fn offline_placeholders(text: &str, source: Language) -> LocalizedString {
    placeholders(text, source, "")
}

/// `[EN-ERR] text` style output used when the translation call failed.
pub fn error_placeholders(text: &str, source: Language) -> LocalizedString {
    placeholders(text, source, "-ERR")
}

#[derive(Debug, Serialize)]
struct TranslationRequest<'a> {
    text: &'a str,
    source_language: Language,
    targets: Vec<Language>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslationResponse {
    ru: Option<String>,
    en: Option<String>,
    sr: Option<String>,
}

impl TranslationResponse {
    fn text(&self, language: Language) -> Option<&str> {
        let text = match language {
            Language::Ru => self.ru.as_deref(),
            Language::En => self.en.as_deref(),
            Language::Sr => self.sr.as_deref(),
        };
        text.filter(|t| !t.trim().is_empty())
    }
}

pub struct HttpTranslator {
    api_url: String,
    api_key: String,
    http_client: Client,
}

impl HttpTranslator {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_url: config.translation_api_url.clone(),
            api_key: config.translation_api_key.clone(),
            http_client: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }

    async fn request(&self, text: &str, source: Language) -> Result<TranslationResponse, TranslationError> {
        if !self.is_configured() {
            return Err(TranslationError::NotConfigured);
        }

        let body = TranslationRequest {
            text,
            source_language: source,
            targets: Language::ALL.into_iter().filter(|l| *l != source).collect(),
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, source: Language) -> LocalizedString {
        if !self.is_configured() {
            debug!("Translation not configured, using offline placeholders");
            return offline_placeholders(text, source);
        }

        match self.request(text, source).await {
            Ok(response) => {
                let mut result = LocalizedString::default();
                for language in Language::ALL {
                    if language == source {
                        result.set(language, text);
                    } else if let Some(translated) = response.text(language) {
                        result.set(language, translated);
                    } else {
                        warn!("Translation response missing '{}', using placeholder", language);
                        result.set(language, offline_placeholders(text, source).get(language));
                    }
                }
                result
            }
            Err(err) => {
                error!("Error translating text: {}", err);
                error_placeholders(text, source)
            }
        }
    }
}
