use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::{Service, SlotTime};

use crate::models::{ClearDayProposal, Specialist, SpecialistError, UpdateProfileRequest};

/// In-memory register of every specialist, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SpecialistDirectory {
    specialists: Vec<Specialist>,
}

impl SpecialistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specialists(specialists: Vec<Specialist>) -> Self {
        Self { specialists }
    }

    pub fn add_specialist(&mut self, specialist: Specialist) -> Result<Uuid, SpecialistError> {
        if !specialist.access_key.is_empty() && self.find_by_access_key(&specialist.access_key).is_some() {
            warn!("Refusing specialist {} with duplicate access key", specialist.name);
            return Err(SpecialistError::DuplicateAccessKey);
        }
        if !specialist.service_ids.is_empty() {
            warn!("Refusing specialist {} with preassigned services", specialist.name);
            return Err(SpecialistError::ValidationError(
                "services are assigned from the service catalog".to_string(),
            ));
        }

        let id = specialist.id;
        info!("Specialist {} added: {}", id, specialist.name);
        self.specialists.push(specialist);
        Ok(id)
    }

    pub fn get(&self, specialist_id: Uuid) -> Option<&Specialist> {
        self.specialists.iter().find(|s| s.id == specialist_id)
    }

    pub fn require(&self, specialist_id: Uuid) -> Result<&Specialist, SpecialistError> {
        self.get(specialist_id)
            .ok_or(SpecialistError::NotFound(specialist_id))
    }

    pub(crate) fn require_mut(&mut self, specialist_id: Uuid) -> Result<&mut Specialist, SpecialistError> {
        self.specialists
            .iter_mut()
            .find(|s| s.id == specialist_id)
            .ok_or(SpecialistError::NotFound(specialist_id))
    }

    pub fn all(&self) -> &[Specialist] {
        &self.specialists
    }

    pub fn find_by_access_key(&self, access_key: &str) -> Option<&Specialist> {
        if access_key.is_empty() {
            return None;
        }
        self.specialists.iter().find(|s| s.access_key == access_key)
    }

    pub fn update_profile(
        &mut self,
        specialist_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<&Specialist, SpecialistError> {
        debug!("Updating profile for specialist {}", specialist_id);

        if let Some(key) = request.access_key.as_deref() {
            let taken = self
                .find_by_access_key(key)
                .is_some_and(|other| other.id != specialist_id);
            if taken {
                return Err(SpecialistError::DuplicateAccessKey);
            }
        }
        if let Some(name) = request.name.as_deref() {
            if name.trim().is_empty() {
                return Err(SpecialistError::ValidationError("Name cannot be empty".to_string()));
            }
        }

        let specialist = self.require_mut(specialist_id)?;
        if let Some(name) = request.name {
            specialist.name = name.trim().to_string();
        }
        if let Some(bio) = request.bio {
            specialist.bio = bio;
        }
        if let Some(avatar) = request.avatar {
            specialist.avatar = Some(avatar);
        }
        if let Some(access_key) = request.access_key {
            specialist.access_key = access_key;
        }

        info!("Specialist {} profile updated", specialist_id);
        Ok(&*specialist)
    }

    /// Record whether the specialist offers a service. Returns `true` when
    /// anything changed.
    pub fn set_offers(
        &mut self,
        specialist_id: Uuid,
        service_id: Uuid,
        offered: bool,
    ) -> Result<bool, SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        let present = specialist.offers(service_id);

        match (offered, present) {
            (true, false) => specialist.service_ids.push(service_id),
            (false, true) => specialist.service_ids.retain(|id| *id != service_id),
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub fn forget_service(&mut self, service_id: Uuid) {
        for specialist in &mut self.specialists {
            specialist.service_ids.retain(|id| *id != service_id);
        }
    }

    /// Specialists allowed to perform `service`, in the service's own order.
    pub fn eligible_for(&self, service: &Service) -> Vec<&Specialist> {
        service
            .specialist_ids
            .iter()
            .filter_map(|id| {
                let found = self.get(*id);
                if found.is_none() {
                    warn!("Service {} lists unknown specialist {}", service.id, id);
                }
                found
            })
            .collect()
    }

    pub fn add_work_slot(
        &mut self,
        specialist_id: Uuid,
        date: NaiveDate,
        slot: SlotTime,
    ) -> Result<bool, SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        let added = specialist.work_schedule.add_slot(date, slot);
        if added {
            info!("Added {} on {} for specialist {}", slot, date, specialist_id);
        }
        Ok(added)
    }

    pub fn remove_work_slot(
        &mut self,
        specialist_id: Uuid,
        date: NaiveDate,
        slot: SlotTime,
    ) -> Result<bool, SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        let removed = specialist.work_schedule.remove_slot(date, slot);
        if removed {
            info!("Removed {} on {} for specialist {}", slot, date, specialist_id);
        }
        Ok(removed)
    }

    pub fn set_work_day(
        &mut self,
        specialist_id: Uuid,
        date: NaiveDate,
        slots: BTreeSet<SlotTime>,
    ) -> Result<(), SpecialistError> {
        let specialist = self.require_mut(specialist_id)?;
        specialist.work_schedule.replace_day(date, slots);
        info!("Work day {} replaced for specialist {}", date, specialist_id);
        Ok(())
    }

    pub fn propose_clear_day(
        &self,
        specialist_id: Uuid,
        date: NaiveDate,
    ) -> Result<ClearDayProposal, SpecialistError> {
        let specialist = self.require(specialist_id)?;
        Ok(ClearDayProposal {
            specialist_id,
            date,
            discarded: specialist
                .work_schedule
                .slots_on(date)
                .cloned()
                .unwrap_or_default(),
        })
    }

    pub fn commit_clear_day(&mut self, proposal: ClearDayProposal) -> Result<(), SpecialistError> {
        let specialist = self.require_mut(proposal.specialist_id)?;
        specialist.work_schedule.clear_day(proposal.date);
        info!(
            "Cleared {} for specialist {} ({} slots dropped)",
            proposal.date,
            proposal.specialist_id,
            proposal.discarded.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_models::LocalizedString;

    #[test]
    fn test_services_come_from_the_catalog_side() {
        let mut directory = SpecialistDirectory::new();
        let mut anna = Specialist::new("Anna", LocalizedString::new("Био", "Bio", "Bio"), "anna_pass");
        let service_id = Uuid::new_v4();
        anna.service_ids.push(service_id);

        assert_matches!(
            directory.add_specialist(anna.clone()),
            Err(SpecialistError::ValidationError(_))
        );
        assert!(directory.all().is_empty());

        anna.service_ids.clear();
        let id = directory.add_specialist(anna).unwrap();
        assert!(directory.set_offers(id, service_id, true).unwrap());
        assert!(directory.require(id).unwrap().offers(service_id));
    }
}
