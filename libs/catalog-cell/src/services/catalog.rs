use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::Service;

use crate::models::{CatalogError, ServiceDeletionProposal, ServiceDraft};

#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
}

fn build_service(id: Uuid, draft: ServiceDraft) -> Result<Service, CatalogError> {
    let service = Service {
        id,
        name: draft.name,
        description: draft.description,
        category: draft.category,
        price: draft.price,
        duration_minutes: draft.duration_minutes,
        specialist_ids: draft.specialist_ids,
        image: draft.image.filter(|image| !image.trim().is_empty()),
    };
    service.validate()?;
    Ok(service)
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_service(&mut self, draft: ServiceDraft) -> Result<Service, CatalogError> {
        let service = build_service(Uuid::new_v4(), draft).map_err(|err| {
            warn!("Rejected new service: {}", err);
            err
        })?;

        info!("Service {} added: {}", service.id, service.name.ru);
        self.services.push(service.clone());
        Ok(service)
    }

    pub fn update_service(&mut self, service_id: Uuid, draft: ServiceDraft) -> Result<Service, CatalogError> {
        debug!("Updating service {}", service_id);

        let index = self.index_of(service_id)?;
        let service = build_service(service_id, draft)?;
        self.services[index] = service.clone();

        info!("Service {} updated", service_id);
        Ok(service)
    }

    /// Flip whether the specialist performs this service. Returns the new state.
    pub fn toggle_specialist(&mut self, service_id: Uuid, specialist_id: Uuid) -> Result<bool, CatalogError> {
        let index = self.index_of(service_id)?;
        let ids = &mut self.services[index].specialist_ids;

        let offered = match ids.iter().position(|id| *id == specialist_id) {
            Some(position) => {
                ids.remove(position);
                false
            }
            None => {
                ids.push(specialist_id);
                true
            }
        };

        info!(
            "Specialist {} {} service {}",
            specialist_id,
            if offered { "now offers" } else { "no longer offers" },
            service_id
        );
        Ok(offered)
    }

    pub fn propose_deletion(&self, service_id: Uuid) -> Result<ServiceDeletionProposal, CatalogError> {
        self.index_of(service_id)?;
        Ok(ServiceDeletionProposal { service_id })
    }

    pub fn commit_deletion(&mut self, proposal: ServiceDeletionProposal) -> Result<Service, CatalogError> {
        let index = self.index_of(proposal.service_id)?;
        let removed = self.services.remove(index);
        info!("Service {} deleted", removed.id);
        Ok(removed)
    }

    pub fn get(&self, service_id: Uuid) -> Option<&Service> {
        self.services.iter().find(|s| s.id == service_id)
    }

    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn offered_by(&self, specialist_id: Uuid) -> Vec<&Service> {
        self.services
            .iter()
            .filter(|s| s.is_offered_by(specialist_id))
            .collect()
    }

    fn index_of(&self, service_id: Uuid) -> Result<usize, CatalogError> {
        self.services
            .iter()
            .position(|s| s.id == service_id)
            .ok_or(CatalogError::ServiceNotFound(service_id))
    }
}
