use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ModelError;
use crate::localization::LocalizedString;

/// Longest treatment accepted into the catalog: one full day.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// A bookable treatment from the salon's menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: LocalizedString,
    pub description: LocalizedString,
    pub category: LocalizedString,
    /// Minor currency units.
    pub price: u32,
    pub duration_minutes: u32,
    /// Eligible specialists. The order is the tie-break order when a
    /// client books "any specialist".
    pub specialist_ids: Vec<Uuid>,
    pub image: Option<String>,
}

impl Service {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.name.is_complete() {
            return Err(ModelError::IncompleteLocalization("name"));
        }
        if !self.description.is_complete() {
            return Err(ModelError::IncompleteLocalization("description"));
        }
        if !self.category.is_complete() {
            return Err(ModelError::IncompleteLocalization("category"));
        }
        if self.price == 0 {
            return Err(ModelError::InvalidPrice);
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ModelError::InvalidDuration);
        }
        Ok(())
    }

    pub fn is_offered_by(&self, specialist_id: Uuid) -> bool {
        self.specialist_ids.contains(&specialist_id)
    }
}
