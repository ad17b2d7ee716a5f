use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::{LocalizedString, ModelError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDraft {
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub category: LocalizedString,
    pub price: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub specialist_ids: Vec<Uuid>,
    pub image: Option<String>,
}

/// Pending service deletion, waiting for the admin to confirm.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDeletionProposal {
    pub service_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    News,
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PromoPeriod {
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: Uuid,
    pub kind: PublicationKind,
    pub title: LocalizedString,
    pub content: LocalizedString,
    pub image: Option<String>,
    pub publish_date: NaiveDate,
    pub promo_period: Option<PromoPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicationDraft {
    pub kind: PublicationKind,
    pub title: LocalizedString,
    pub content: LocalizedString,
    pub image: Option<String>,
    pub publish_date: NaiveDate,
    pub promo_period: Option<PromoPeriod>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Service not found: {0}")]
    ServiceNotFound(Uuid),

    #[error("Publication not found: {0}")]
    PublicationNotFound(Uuid),

    #[error("Promotions need a promo period")]
    MissingPromoPeriod,

    #[error("News items cannot carry a promo period")]
    UnexpectedPromoPeriod,

    #[error("Promo period ends on {end} before it starts on {start}")]
    InvalidPromoPeriod { start: NaiveDate, end: NaiveDate },

    #[error(transparent)]
    Model(#[from] ModelError),
}
