use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use shared_models::ModelError;

use crate::models::{CatalogError, Publication, PublicationDraft, PublicationKind};

/// News items and promotions shown on the client home screen.
#[derive(Debug, Clone, Default)]
pub struct PublicationBoard {
    publications: Vec<Publication>,
}

fn validate_draft(draft: &PublicationDraft) -> Result<(), CatalogError> {
    if !draft.title.is_complete() {
        return Err(ModelError::IncompleteLocalization("title").into());
    }
    if !draft.content.is_complete() {
        return Err(ModelError::IncompleteLocalization("content").into());
    }

    match (draft.kind, draft.promo_period) {
        (PublicationKind::Promotion, None) => Err(CatalogError::MissingPromoPeriod),
        (PublicationKind::Promotion, Some(period)) if period.end < period.start => {
            Err(CatalogError::InvalidPromoPeriod {
                start: period.start,
                end: period.end,
            })
        }
        (PublicationKind::News, Some(_)) => Err(CatalogError::UnexpectedPromoPeriod),
        _ => Ok(()),
    }
}

impl PublicationBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, draft: PublicationDraft) -> Result<Publication, CatalogError> {
        if let Err(err) = validate_draft(&draft) {
            warn!("Rejected publication draft: {}", err);
            return Err(err);
        }

        let publication = Publication {
            id: Uuid::new_v4(),
            kind: draft.kind,
            title: draft.title,
            content: draft.content,
            image: draft.image,
            publish_date: draft.publish_date,
            promo_period: draft.promo_period,
        };
        info!("Publication {} published ({:?})", publication.id, publication.kind);
        self.publications.push(publication.clone());
        Ok(publication)
    }

    pub fn update(&mut self, publication_id: Uuid, draft: PublicationDraft) -> Result<Publication, CatalogError> {
        let index = self.index_of(publication_id)?;
        validate_draft(&draft)?;

        let publication = &mut self.publications[index];
        publication.kind = draft.kind;
        publication.title = draft.title;
        publication.content = draft.content;
        publication.image = draft.image;
        publication.publish_date = draft.publish_date;
        publication.promo_period = draft.promo_period;

        info!("Publication {} updated", publication_id);
        Ok(publication.clone())
    }

    /// First phase of deletion; only checks the publication exists.
    pub fn propose_deletion(&self, publication_id: Uuid) -> Result<Uuid, CatalogError> {
        self.index_of(publication_id).map(|_| publication_id)
    }

    pub fn commit_deletion(&mut self, publication_id: Uuid) -> Result<Publication, CatalogError> {
        let index = self.index_of(publication_id)?;
        let removed = self.publications.remove(index);
        info!("Publication {} deleted", publication_id);
        Ok(removed)
    }

    /// Newest first.
    pub fn all(&self) -> Vec<&Publication> {
        let mut publications: Vec<&Publication> = self.publications.iter().collect();
        publications.sort_by(|a, b| b.publish_date.cmp(&a.publish_date));
        publications
    }

    pub fn active_promotions(&self, today: NaiveDate) -> Vec<&Publication> {
        self.all()
            .into_iter()
            .filter(|p| p.kind == PublicationKind::Promotion)
            .filter(|p| p.promo_period.is_some_and(|period| period.contains(today)))
            .collect()
    }

    fn index_of(&self, publication_id: Uuid) -> Result<usize, CatalogError> {
        self.publications
            .iter()
            .position(|p| p.id == publication_id)
            .ok_or(CatalogError::PublicationNotFound(publication_id))
    }
}
