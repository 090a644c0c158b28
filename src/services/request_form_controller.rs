use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use crate::config::constants::DATE_FORMAT;
use crate::enums::draft_field::DraftField;
use crate::enums::submit_outcome::SubmitOutcome;
use crate::errors::{PortalError, PortalResult};
use crate::helpers::draft_validator::DraftValidator;
use crate::helpers::submission_gate::SubmissionGate;
use crate::services::group_editor::GroupEditor;
use crate::services::port_editor::PortEditor;
use crate::structs::port_usage_record::PortUsageRecord;
use crate::structs::server_request_draft::ServerRequestDraft;
use crate::structs::server_request_submission::ServerRequestSubmission;
use crate::structs::submission_ticket::SubmissionTicket;
use crate::traits::group_selection::GroupSelection;
use crate::traits::portal_api::PortalApi;

/// Collects, validates and submits a new server request.
#[derive(Default)]
pub struct RequestFormController {
    draft: ServerRequestDraft,
    gate: SubmissionGate,
}

impl RequestFormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ServerRequestDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn select_resource_group(&mut self, resource_group_id: i64) {
        self.draft.resource_group_id = Some(resource_group_id);
    }

    pub fn select_image(&mut self, image_id: i64) {
        self.draft.image_id = Some(image_id);
    }

    pub fn edit_volume_size(&mut self, text: &str) {
        self.draft.volume_size = text.to_string();
    }

    pub fn edit_expires_at(&mut self, text: &str) {
        self.draft.expires_at = text.to_string();
    }

    pub fn set_justification(&mut self, text: &str) {
        self.draft.justification = text.to_string();
    }

    pub fn add_port(&mut self, port: &str, purpose: &str) -> PortalResult<u16> {
        PortEditor::add_port(&mut self.draft.ports, port, purpose)
    }

    pub fn remove_port(&mut self, port: u16) -> bool {
        PortEditor::remove_port(&mut self.draft.ports, port)
    }

    pub fn update_port_purpose(&mut self, port: u16, purpose: &str) -> bool {
        PortEditor::update_port_purpose(&mut self.draft.ports, port, purpose)
    }

    pub fn ports_mut(&mut self) -> &mut Vec<PortUsageRecord> {
        &mut self.draft.ports
    }

    pub fn add_group(&mut self, group_id: i64) -> bool {
        GroupEditor::add_to(&mut self.draft.group_ids, group_id)
    }

    pub fn remove_group(&mut self, group_id: i64) -> bool {
        GroupEditor::remove_from(&mut self.draft.group_ids, group_id)
    }

    pub fn validate(&self) -> BTreeMap<DraftField, String> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> BTreeMap<DraftField, String> {
        let mut errors = BTreeMap::new();

        if self.draft.resource_group_id.is_none() {
            errors.insert(DraftField::ResourceGroup, "Select a GPU resource group".to_string());
        }
        if self.draft.image_id.is_none() {
            errors.insert(DraftField::Image, "Select a container image".to_string());
        }
        if let Err(message) = DraftValidator::volume_size(&self.draft.volume_size) {
            errors.insert(DraftField::VolumeSize, message);
        }
        if let Err(message) = DraftValidator::expiry_date(&self.draft.expires_at, now) {
            errors.insert(DraftField::ExpiresAt, message);
        }
        if let Err(message) = DraftValidator::justification(&self.draft.justification) {
            errors.insert(DraftField::Justification, message);
        }

        errors
    }

    pub fn build_submission(&self) -> PortalResult<ServerRequestSubmission> {
        self.build_submission_at(Utc::now())
    }

    pub fn build_submission_at(&self, now: DateTime<Utc>) -> PortalResult<ServerRequestSubmission> {
        let errors = self.validate_at(now);
        let parsed = (
            self.draft.resource_group_id,
            self.draft.image_id,
            DraftValidator::volume_size(&self.draft.volume_size),
            DraftValidator::expiry_date(&self.draft.expires_at, now),
        );
        let (Some(resource_group_id), Some(image_id), Ok(volume_size), Ok(expires_at)) = parsed else {
            return Err(PortalError::InvalidDraft { errors });
        };
        if !errors.is_empty() {
            return Err(PortalError::InvalidDraft { errors });
        }

        Ok(ServerRequestSubmission {
            resource_group_id,
            image_id,
            volume_size,
            expires_at: expires_at.format(DATE_FORMAT).to_string(),
            port_mappings: self.draft.ports.clone(),
            group_ids: self.draft.group_ids.clone(),
            reason: self.draft.justification.trim().to_string(),
        })
    }

    pub fn begin_submission(&mut self) -> PortalResult<(SubmissionTicket, ServerRequestSubmission)> {
        if self.gate.is_in_flight() {
            return Err(PortalError::SubmissionInFlight);
        }
        let submission = self.build_submission()?;
        let ticket = self.gate.begin()?;
        Ok((ticket, submission))
    }

    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: PortalResult<()>,
    ) -> PortalResult<SubmitOutcome> {
        if !self.gate.finish(ticket) {
            log::debug!("Ignoring new-request response for a discarded draft");
            return Ok(SubmitOutcome::Stale);
        }
        result?;
        self.discard();
        Ok(SubmitOutcome::Submitted)
    }

    pub async fn submit(&mut self, api: &dyn PortalApi) -> PortalResult<SubmitOutcome> {
        let (ticket, submission) = self.begin_submission()?;
        let result = api.create_request(&submission).await;
        self.complete_submission(ticket, result)
    }

    pub fn discard(&mut self) {
        self.draft = ServerRequestDraft::default();
        self.gate.reset();
    }
}

impl GroupSelection for RequestFormController {
    fn accepts_groups(&self) -> bool {
        true
    }

    fn selected_groups(&self) -> &[i64] {
        &self.draft.group_ids
    }

    fn select_group(&mut self, group_id: i64) -> PortalResult<bool> {
        Ok(self.add_group(group_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use crate::traits::portal_api::MockPortalApi;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn filled() -> RequestFormController {
        let mut form = RequestFormController::new();
        form.select_resource_group(2);
        form.select_image(5);
        form.edit_volume_size("200");
        form.edit_expires_at("2026-08-31");
        form.set_justification("Training segmentation models");
        form
    }

    #[test]
    fn empty_form_reports_each_required_field() {
        let errors = RequestFormController::new().validate_at(now());
        let keys: Vec<DraftField> = errors.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                DraftField::ResourceGroup,
                DraftField::Image,
                DraftField::VolumeSize,
                DraftField::ExpiresAt,
                DraftField::Justification,
            ]
        );
    }

    #[test]
    fn submission_carries_ports_and_groups() {
        let mut form = filled();
        form.add_port("22", "").unwrap();
        form.add_port("8888", "jupyter").unwrap();
        form.add_group(4);
        form.add_group(4);

        let submission = form.build_submission_at(now()).unwrap();
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "resourceGroupId": 2,
                "imageId": 5,
                "volumeSize": 200,
                "expiresAt": "2026-08-31",
                "portMappings": [
                    {"internalPort": 22, "usagePurpose": "포트 22"},
                    {"internalPort": 8888, "usagePurpose": "jupyter"}
                ],
                "groupIds": [4],
                "reason": "Training segmentation models",
            })
        );
    }

    #[test]
    fn out_of_range_volume_blocks_submission() {
        let mut form = filled();
        form.edit_volume_size("5000");
        assert!(matches!(form.build_submission_at(now()), Err(PortalError::InvalidDraft { .. })));
    }

    #[tokio::test]
    async fn network_failure_keeps_draft() {
        let mut api = MockPortalApi::new();
        api.expect_create_request()
            .times(1)
            .returning(|_| Err(PortalError::network("POST /api/requests", None, "timeout")));

        let mut form = filled();
        form.edit_expires_at("2099-01-01");
        let before = form.draft().clone();
        assert!(form.submit(&api).await.is_err());
        assert_eq!(form.draft(), &before);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn success_resets_form() {
        let mut api = MockPortalApi::new();
        api.expect_create_request().times(1).returning(|_| Ok(()));

        let mut form = filled();
        form.edit_expires_at("2099-01-01");
        assert_eq!(form.submit(&api).await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(form.draft(), &ServerRequestDraft::default());
    }
}
