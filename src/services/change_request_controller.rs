use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use crate::enums::change_value::ChangeValue;
use crate::enums::changeable_field::ChangeableField;
use crate::enums::draft_field::DraftField;
use crate::enums::submit_outcome::SubmitOutcome;
use crate::errors::{PortalError, PortalResult};
use crate::helpers::draft_validator::DraftValidator;
use crate::helpers::submission_gate::SubmissionGate;
use crate::services::group_editor::GroupEditor;
use crate::services::port_editor::PortEditor;
use crate::structs::change_request_draft::ChangeRequestDraft;
use crate::structs::change_request_submission::ChangeRequestSubmission;
use crate::structs::port_usage_record::PortUsageRecord;
use crate::structs::server_request::ServerRequest;
use crate::structs::submission_ticket::SubmissionTicket;
use crate::traits::group_selection::GroupSelection;
use crate::traits::portal_api::PortalApi;

/// Drives a [`ChangeRequestDraft`] from an empty form to a submitted
/// change request against one of the user's approved requests.
pub struct ChangeRequestController {
    approved_requests: Vec<ServerRequest>,
    draft: ChangeRequestDraft,
    gate: SubmissionGate,
}

impl ChangeRequestController {
    /// Only approved requests from `requests` can be targeted.
    pub fn new(requests: Vec<ServerRequest>) -> Self {
        Self {
            approved_requests: requests.into_iter().filter(ServerRequest::is_approved).collect(),
            draft: ChangeRequestDraft::default(),
            gate: SubmissionGate::default(),
        }
    }

    pub fn draft(&self) -> &ChangeRequestDraft {
        &self.draft
    }

    pub fn field(&self) -> Option<ChangeableField> {
        self.draft.field()
    }

    pub fn approved_requests(&self) -> &[ServerRequest] {
        &self.approved_requests
    }

    pub fn target_request(&self) -> Option<&ServerRequest> {
        let id = self.draft.target_request_id?;
        self.approved_requests.iter().find(|r| r.request_id == id)
    }

    /// Current value of the selected field on the selected target.
    pub fn current_value(&self) -> Option<String> {
        Some(self.target_request()?.current_value(self.field()?))
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_in_flight()
    }

    pub fn select_target(&mut self, request_id: i64) -> PortalResult<()> {
        if !self.approved_requests.iter().any(|r| r.request_id == request_id) {
            return Err(PortalError::UnknownTarget { request_id });
        }
        self.draft.target_request_id = Some(request_id);
        Ok(())
    }

    /// Switches the edited field. Whatever was entered for the previous
    /// field is discarded, even when the same field is selected again.
    pub fn select_field(&mut self, field: ChangeableField) {
        if let Some(previous) = self.draft.value.as_ref().filter(|v| !v.is_empty()) {
            log::debug!("Discarding {} value on switch to {}", previous.field(), field);
        }
        self.draft.value = Some(ChangeValue::empty_for(field));
    }

    /// Stores raw text for a scalar field; parsing happens in validation.
    pub fn edit_scalar_value(&mut self, text: &str) -> PortalResult<()> {
        let mismatch = self.mismatch("edit value");
        let slot = self
            .draft
            .value
            .as_mut()
            .and_then(ChangeValue::scalar_mut)
            .ok_or(mismatch)?;
        *slot = text.to_string();
        Ok(())
    }

    pub fn set_justification(&mut self, text: &str) {
        self.draft.justification = text.to_string();
    }

    /// `Ok(false)` if the group was already selected.
    pub fn add_group(&mut self, group_id: i64) -> PortalResult<bool> {
        Ok(GroupEditor::add_to(self.groups_mut("add group")?, group_id))
    }

    pub fn remove_group(&mut self, group_id: i64) -> PortalResult<bool> {
        Ok(GroupEditor::remove_from(self.groups_mut("remove group")?, group_id))
    }

    pub fn add_port(&mut self, port: &str, purpose: &str) -> PortalResult<u16> {
        PortEditor::add_port(self.ports_mut()?, port, purpose)
    }

    pub fn remove_port(&mut self, port: u16) -> PortalResult<bool> {
        Ok(PortEditor::remove_port(self.ports_mut()?, port))
    }

    pub fn update_port_purpose(&mut self, port: u16, purpose: &str) -> PortalResult<bool> {
        Ok(PortEditor::update_port_purpose(self.ports_mut()?, port, purpose))
    }

    /// Port list of a `PortMapping` draft, for the inline purpose editor.
    pub fn ports_mut(&mut self) -> PortalResult<&mut Vec<PortUsageRecord>> {
        let mismatch = self.mismatch("edit ports");
        self.draft
            .value
            .as_mut()
            .and_then(ChangeValue::ports_mut)
            .ok_or(mismatch)
    }

    pub fn validate(&self) -> BTreeMap<DraftField, String> {
        self.validate_at(Utc::now())
    }

    pub fn validate_at(&self, now: DateTime<Utc>) -> BTreeMap<DraftField, String> {
        let mut errors = BTreeMap::new();

        if self.draft.target_request_id.is_none() {
            errors.insert(DraftField::Target, "Select one of your approved requests".to_string());
        }

        match &self.draft.value {
            None => {
                errors.insert(DraftField::Field, "Select what to change".to_string());
                errors.insert(DraftField::Value, "Enter a new value".to_string());
            }
            Some(value) => {
                if let Err(message) = Self::check_value(value, now) {
                    errors.insert(DraftField::Value, message);
                }
            }
        }

        if let Err(message) = DraftValidator::justification(&self.draft.justification) {
            errors.insert(DraftField::Justification, message);
        }

        errors
    }

    fn check_value(value: &ChangeValue, now: DateTime<Utc>) -> Result<(), String> {
        if value.is_empty() {
            return Err(match value.field() {
                ChangeableField::GroupMembership => "Select at least one group".to_string(),
                ChangeableField::PortMapping => "Add at least one port".to_string(),
                _ => "Enter a new value".to_string(),
            });
        }
        match value {
            ChangeValue::VolumeSize(text) => DraftValidator::volume_size(text).map(|_| ()),
            ChangeValue::ExpiresAt(text) => DraftValidator::expiry_date(text, now).map(|_| ()),
            ChangeValue::ResourceGroup(text) => DraftValidator::identifier(text, "resource group").map(|_| ()),
            ChangeValue::ContainerImage(text) => DraftValidator::identifier(text, "container image").map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Wire payload for a valid draft. An invalid draft is an error, never a
    /// partially filled payload.
    pub fn build_submission(&self) -> PortalResult<ChangeRequestSubmission> {
        self.build_submission_at(Utc::now())
    }

    pub fn build_submission_at(&self, now: DateTime<Utc>) -> PortalResult<ChangeRequestSubmission> {
        let errors = self.validate_at(now);
        let (Some(target_request_id), Some(value), true) =
            (self.draft.target_request_id, self.draft.value.as_ref(), errors.is_empty())
        else {
            return Err(PortalError::InvalidDraft { errors });
        };

        Ok(ChangeRequestSubmission {
            target_request_id,
            change_type: value.field().change_type(),
            new_value: value.to_wire(),
            reason: self.draft.justification.trim().to_string(),
        })
    }

    /// Validates, builds the payload and marks the draft as submitting.
    pub fn begin_submission(&mut self) -> PortalResult<(SubmissionTicket, ChangeRequestSubmission)> {
        if self.gate.is_in_flight() {
            return Err(PortalError::SubmissionInFlight);
        }
        let submission = self.build_submission()?;
        let ticket = self.gate.begin()?;
        Ok((ticket, submission))
    }

    /// Applies the portal's answer. Success discards the draft; failure keeps
    /// it editable. Answers for a draft that was discarded meanwhile are ignored.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: PortalResult<()>,
    ) -> PortalResult<SubmitOutcome> {
        if !self.gate.finish(ticket) {
            log::debug!("Ignoring change-request response for a discarded draft");
            return Ok(SubmitOutcome::Stale);
        }
        match result {
            Ok(()) => {
                self.discard();
                Ok(SubmitOutcome::Submitted)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn submit(&mut self, api: &dyn PortalApi) -> PortalResult<SubmitOutcome> {
        let (ticket, submission) = self.begin_submission()?;
        log::debug!(
            "Submitting {:?} change for request #{}",
            submission.change_type,
            submission.target_request_id
        );
        let result = api.create_change_request(&submission).await;
        self.complete_submission(ticket, result)
    }

    /// Drops the draft, e.g. on navigation away.
    pub fn discard(&mut self) {
        self.draft = ChangeRequestDraft::default();
        self.gate.reset();
    }

    fn groups_mut(&mut self, operation: &str) -> PortalResult<&mut Vec<i64>> {
        let mismatch = self.mismatch(operation);
        self.draft
            .value
            .as_mut()
            .and_then(ChangeValue::groups_mut)
            .ok_or(mismatch)
    }

    fn mismatch(&self, operation: &str) -> PortalError {
        let field = self
            .field()
            .map(|f| f.label().to_string())
            .unwrap_or_else(|| "no field".to_string());
        PortalError::field_mismatch(operation, &field)
    }
}

impl GroupSelection for ChangeRequestController {
    fn accepts_groups(&self) -> bool {
        self.field() == Some(ChangeableField::GroupMembership)
    }

    fn selected_groups(&self) -> &[i64] {
        self.draft
            .value
            .as_ref()
            .and_then(ChangeValue::groups)
            .unwrap_or(&[])
    }

    fn select_group(&mut self, group_id: i64) -> PortalResult<bool> {
        self.add_group(group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockall::predicate::always;
    use serde_json::json;
    use crate::enums::change_type::ChangeType;
    use crate::enums::request_status::RequestStatus;
    use crate::traits::portal_api::MockPortalApi;

    fn request(id: i64, status: RequestStatus) -> ServerRequest {
        serde_json::from_value(json!({
            "requestId": id,
            "status": status,
            "volumeSizeGib": 100,
        }))
        .unwrap()
    }

    fn controller() -> ChangeRequestController {
        ChangeRequestController::new(vec![
            request(42, RequestStatus::Approved),
            request(43, RequestStatus::Pending),
        ])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap()
    }

    fn ready_volume_change() -> ChangeRequestController {
        let mut c = controller();
        c.select_target(42).unwrap();
        c.select_field(ChangeableField::VolumeSize);
        c.edit_scalar_value("500").unwrap();
        c.set_justification("Need more space for datasets");
        c
    }

    #[test]
    fn only_approved_requests_can_be_targeted() {
        let mut c = controller();
        assert!(c.select_target(42).is_ok());
        assert!(matches!(c.select_target(43), Err(PortalError::UnknownTarget { request_id: 43 })));
        assert!(c.select_target(99).is_err());
        assert_eq!(c.draft().target_request_id, Some(42));
    }

    #[test]
    fn field_switch_resets_value_to_empty_shape() {
        for from in ChangeableField::ALL {
            for to in ChangeableField::ALL {
                let mut c = controller();
                c.select_field(from);
                if from.is_list() {
                    if from == ChangeableField::GroupMembership {
                        c.add_group(1).unwrap();
                    } else {
                        c.add_port("22", "ssh").unwrap();
                    }
                } else {
                    c.edit_scalar_value("500").unwrap();
                }
                c.select_field(to);
                assert_eq!(c.draft().value, Some(ChangeValue::empty_for(to)), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn switching_from_volume_to_groups_yields_empty_list() {
        let mut c = controller();
        c.select_target(42).unwrap();
        c.select_field(ChangeableField::VolumeSize);
        c.edit_scalar_value("500").unwrap();

        c.select_field(ChangeableField::GroupMembership);

        assert_eq!(c.draft().value, Some(ChangeValue::GroupMembership(vec![])));
        assert_eq!(c.selected_groups(), &[] as &[i64]);
    }

    #[test]
    fn edit_operations_check_the_selected_field() {
        let mut c = controller();
        assert!(matches!(c.edit_scalar_value("1"), Err(PortalError::FieldMismatch { .. })));

        c.select_field(ChangeableField::GroupMembership);
        assert!(c.edit_scalar_value("1").is_err());
        assert!(c.add_port("22", "ssh").is_err());

        c.select_field(ChangeableField::PortMapping);
        assert!(c.add_group(1).is_err());
        assert!(c.remove_group(1).is_err());
    }

    #[test]
    fn add_group_is_idempotent_and_keeps_order() {
        let mut c = controller();
        c.select_field(ChangeableField::GroupMembership);
        assert!(c.add_group(5).unwrap());
        assert!(c.add_group(2).unwrap());
        assert!(!c.add_group(5).unwrap());
        assert_eq!(c.selected_groups(), &[5, 2]);
    }

    #[test]
    fn remove_then_add_restores_set_but_not_order() {
        let mut c = controller();
        c.select_field(ChangeableField::GroupMembership);
        for id in [1, 2, 3] {
            c.add_group(id).unwrap();
        }
        assert!(c.remove_group(1).unwrap());
        assert!(c.add_group(1).unwrap());

        let mut sorted = c.selected_groups().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3]);
        // Re-added ids move to the end.
        assert_eq!(c.selected_groups(), &[2, 3, 1]);
    }

    #[test]
    fn empty_draft_has_exactly_four_errors() {
        let errors = controller().validate_at(now());
        let keys: Vec<DraftField> = errors.keys().copied().collect();
        assert_eq!(
            keys,
            vec![DraftField::Target, DraftField::Field, DraftField::Value, DraftField::Justification]
        );
    }

    #[test]
    fn volume_bounds_are_inclusive() {
        let mut c = ready_volume_change();
        for (input, ok) in [("10", true), ("2000", true), ("9", false), ("2001", false), ("big", false)] {
            c.edit_scalar_value(input).unwrap();
            assert_eq!(c.validate_at(now()).is_empty(), ok, "{input}");
        }
    }

    #[test]
    fn expiry_must_be_in_the_future() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::ExpiresAt);
        c.edit_scalar_value("2026-05-01").unwrap();
        assert!(c.validate_at(now()).contains_key(&DraftField::Value));
        c.edit_scalar_value("2026-05-02").unwrap();
        assert!(c.validate_at(now()).is_empty());
    }

    #[test]
    fn empty_lists_are_missing_values() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::PortMapping);
        assert_eq!(
            c.validate_at(now()).get(&DraftField::Value).map(String::as_str),
            Some("Add at least one port")
        );
    }

    #[test]
    fn short_justification_is_rejected() {
        let mut c = ready_volume_change();
        c.set_justification("too short");
        assert!(c.validate_at(now()).contains_key(&DraftField::Justification));
    }

    #[test]
    fn port_submission_coerces_ports_to_integers() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::PortMapping);
        c.add_port("8080", "web").unwrap();

        let submission = c.build_submission_at(now()).unwrap();
        assert_eq!(submission.change_type, ChangeType::Port);
        assert_eq!(submission.target_request_id, 42);
        assert_eq!(
            serde_json::to_value(&submission).unwrap(),
            json!({
                "changeType": "PORT",
                "newValue": [{"internalPort": 8080, "usagePurpose": "web"}],
                "reason": "Need more space for datasets",
            })
        );
    }

    #[test]
    fn group_submission_is_a_list_of_integers() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::GroupMembership);
        c.add_group(3).unwrap();
        c.add_group(11).unwrap();
        let submission = c.build_submission_at(now()).unwrap();
        assert_eq!(submission.change_type, ChangeType::Group);
        assert_eq!(submission.new_value, json!([3, 11]));
    }

    #[test]
    fn scalar_submission_uses_raw_text() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::ContainerImage);
        c.edit_scalar_value(" 17 ").unwrap();
        let submission = c.build_submission_at(now()).unwrap();
        assert_eq!(submission.change_type, ChangeType::ImageId);
        assert_eq!(submission.new_value, json!("17"));
    }

    #[test]
    fn non_numeric_resource_group_is_rejected() {
        let mut c = ready_volume_change();
        c.select_field(ChangeableField::ResourceGroup);
        c.edit_scalar_value("a100").unwrap();
        let errors = c.validate_at(now());
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![DraftField::Value]);
    }

    #[test]
    fn building_an_invalid_draft_fails_loudly() {
        let c = controller();
        match c.build_submission_at(now()) {
            Err(PortalError::InvalidDraft { errors }) => assert_eq!(errors.len(), 4),
            other => panic!("expected InvalidDraft, got {other:?}"),
        }
    }

    #[test]
    fn current_value_follows_target_and_field() {
        let mut c = controller();
        assert_eq!(c.current_value(), None);
        c.select_target(42).unwrap();
        c.select_field(ChangeableField::VolumeSize);
        assert_eq!(c.current_value().as_deref(), Some("100 GiB"));
    }

    #[tokio::test]
    async fn successful_submit_discards_the_draft() {
        let mut api = MockPortalApi::new();
        api.expect_create_change_request()
            .with(always())
            .times(1)
            .returning(|_| Ok(()));

        let mut c = ready_volume_change();
        c.edit_scalar_value("600").unwrap();
        assert_eq!(c.submit(&api).await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(c.draft(), &ChangeRequestDraft::default());
        assert!(!c.is_submitting());
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_draft_editable() {
        let mut api = MockPortalApi::new();
        api.expect_create_change_request()
            .returning(|_| Err(PortalError::api("POST /api/change-requests/42", 500, "")));

        let mut c = ready_volume_change();
        let before = c.draft().clone();
        let err = c.submit(&api).await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(c.draft(), &before);
        assert!(!c.is_submitting());
        assert!(c.edit_scalar_value("700").is_ok());
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_network() {
        let mut api = MockPortalApi::new();
        api.expect_create_change_request().never();
        let mut c = controller();
        assert!(matches!(c.submit(&api).await, Err(PortalError::InvalidDraft { .. })));
    }

    #[test]
    fn second_submit_is_refused_while_in_flight() {
        let mut c = ready_volume_change();
        let (ticket, _) = c.begin_submission().unwrap();
        assert!(c.is_submitting());
        assert!(matches!(c.begin_submission(), Err(PortalError::SubmissionInFlight)));

        c.complete_submission(ticket, Err(PortalError::network("submit", None, "reset"))).unwrap_err();
        assert!(c.begin_submission().is_ok());
    }

    #[test]
    fn response_for_discarded_draft_is_ignored() {
        let mut c = ready_volume_change();
        let (ticket, _) = c.begin_submission().unwrap();
        c.discard();
        c.select_target(42).unwrap();

        assert_eq!(c.complete_submission(ticket, Ok(())).unwrap(), SubmitOutcome::Stale);
        assert_eq!(c.draft().target_request_id, Some(42));
    }
}
