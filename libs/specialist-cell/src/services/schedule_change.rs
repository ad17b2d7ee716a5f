use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::SlotTime;

use crate::models::{
    ScheduleChangeRequest, ScheduleDecision, ScheduleRequestStatus, Specialist, SpecialistError,
};
use crate::services::directory::SpecialistDirectory;

/// Parse the comma separated start times a specialist types into the request
/// form, e.g. `"09:00, 10:00"`. Blank items are skipped.
pub fn parse_requested_slots(input: &str) -> Result<BTreeSet<SlotTime>, SpecialistError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<SlotTime>().map_err(SpecialistError::from))
        .collect()
}

pub fn submit_schedule_request(
    specialist: &Specialist,
    date: NaiveDate,
    requested_slots: BTreeSet<SlotTime>,
    reason: &str,
) -> ScheduleChangeRequest {
    ScheduleChangeRequest {
        id: Uuid::new_v4(),
        specialist_id: specialist.id,
        specialist_name: specialist.name.clone(),
        date,
        requested_slots,
        reason: reason.trim().to_string(),
        status: ScheduleRequestStatus::Pending,
    }
}

/// Apply an admin decision. Approval replaces the specialist's whole day with
/// the requested slots. On error neither the request nor the calendar changes.
pub fn resolve_schedule_request(
    request: &mut ScheduleChangeRequest,
    decision: ScheduleDecision,
    specialist: &mut Specialist,
) -> Result<(), SpecialistError> {
    if request.status.is_terminal() {
        warn!("Schedule request {} already {}", request.id, request.status);
        return Err(SpecialistError::RequestAlreadyResolved {
            id: request.id,
            status: request.status,
        });
    }
    if request.specialist_id != specialist.id {
        return Err(SpecialistError::RequestSpecialistMismatch {
            request_id: request.id,
            specialist_id: specialist.id,
        });
    }

    match decision {
        ScheduleDecision::Approve => {
            specialist
                .work_schedule
                .replace_day(request.date, request.requested_slots.clone());
            request.status = ScheduleRequestStatus::Approved;
        }
        ScheduleDecision::Reject => {
            request.status = ScheduleRequestStatus::Rejected;
        }
    }

    info!(
        "Schedule request {} for {} on {} {}",
        request.id, request.specialist_name, request.date, request.status
    );
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleChangeWorkflow {
    requests: Vec<ScheduleChangeRequest>,
}

impl ScheduleChangeWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(
        &mut self,
        specialist: &Specialist,
        date: NaiveDate,
        requested_slots: BTreeSet<SlotTime>,
        reason: &str,
    ) -> ScheduleChangeRequest {
        let request = submit_schedule_request(specialist, date, requested_slots, reason);
        info!(
            "Schedule request {} submitted by {} for {} ({} slots)",
            request.id,
            specialist.name,
            date,
            request.requested_slots.len()
        );
        self.requests.push(request.clone());
        request
    }

    pub fn resolve(
        &mut self,
        request_id: Uuid,
        decision: ScheduleDecision,
        directory: &mut SpecialistDirectory,
    ) -> Result<ScheduleChangeRequest, SpecialistError> {
        debug!("Resolving schedule request {} with {:?}", request_id, decision);

        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or(SpecialistError::RequestNotFound(request_id))?;

        if request.status.is_terminal() {
            warn!("Schedule request {} already {}", request.id, request.status);
            return Err(SpecialistError::RequestAlreadyResolved {
                id: request.id,
                status: request.status,
            });
        }

        let specialist = directory.require_mut(request.specialist_id)?;
        resolve_schedule_request(request, decision, specialist)?;
        Ok(request.clone())
    }

    pub fn get(&self, request_id: Uuid) -> Option<&ScheduleChangeRequest> {
        self.requests.iter().find(|r| r.id == request_id)
    }

    pub fn all(&self) -> &[ScheduleChangeRequest] {
        &self.requests
    }

    pub fn pending(&self) -> Vec<&ScheduleChangeRequest> {
        self.requests
            .iter()
            .filter(|r| r.status == ScheduleRequestStatus::Pending)
            .collect()
    }

    pub fn for_specialist(&self, specialist_id: Uuid) -> Vec<&ScheduleChangeRequest> {
        self.requests
            .iter()
            .filter(|r| r.specialist_id == specialist_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_requested_slots() {
        let slots = parse_requested_slots(" 10:00,09:00, ,09:00 ").unwrap();
        let rendered: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, vec!["09:00", "10:00"]);

        assert!(parse_requested_slots("").unwrap().is_empty());
        assert_matches!(parse_requested_slots("09:00, 9am"), Err(SpecialistError::Model(_)));
    }
}
