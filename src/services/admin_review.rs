use std::collections::BTreeMap;
use std::sync::Arc;
use crate::enums::draft_field::DraftField;
use crate::enums::review_decision::ReviewDecision;
use crate::enums::review_target::ReviewTarget;
use crate::errors::{PortalError, PortalResult};
use crate::structs::change_request_record::ChangeRequestRecord;
use crate::structs::server_request::ServerRequest;
use crate::traits::portal_api::PortalApi;

/// Pending-item queues for administrators.
pub struct AdminReviewController {
    api: Arc<dyn PortalApi>,
    requests: Vec<ServerRequest>,
    change_requests: Vec<ChangeRequestRecord>,
}

impl AdminReviewController {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self {
            api,
            requests: Vec::new(),
            change_requests: Vec::new(),
        }
    }

    pub fn pending_requests(&self) -> &[ServerRequest] {
        &self.requests
    }

    pub fn pending_change_requests(&self) -> &[ChangeRequestRecord] {
        &self.change_requests
    }

    /// Reloads both queues. On failure the previous queues are kept.
    pub async fn refresh(&mut self) -> PortalResult<usize> {
        let (requests, change_requests) =
            futures::try_join!(self.api.pending_requests(), self.api.pending_change_requests())?;
        self.requests = requests;
        self.change_requests = change_requests;
        log::debug!(
            "Review queue: {} requests, {} change requests",
            self.requests.len(),
            self.change_requests.len()
        );
        Ok(self.requests.len() + self.change_requests.len())
    }

    pub async fn approve(&mut self, target: ReviewTarget) -> PortalResult<()> {
        self.decide(target, ReviewDecision::Approve).await
    }

    /// Rejection requires a non-blank reason, checked before any network call.
    pub async fn deny(&mut self, target: ReviewTarget, reason: &str) -> PortalResult<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            let mut errors = BTreeMap::new();
            errors.insert(DraftField::Justification, "A rejection reason is required".to_string());
            return Err(PortalError::Validation { errors });
        }
        self.decide(target, ReviewDecision::Reject { reason: reason.to_string() }).await
    }

    async fn decide(&mut self, target: ReviewTarget, decision: ReviewDecision) -> PortalResult<()> {
        if !self.contains(target) {
            return Err(PortalError::UnknownReviewItem {
                item: target.kind().to_string(),
                id: target.id(),
            });
        }

        self.api.review(target, &decision).await?;

        match target {
            ReviewTarget::Request(id) => self.requests.retain(|r| r.request_id != id),
            ReviewTarget::ChangeRequest(id) => self.change_requests.retain(|c| c.change_request_id != id),
        }
        log::info!("✅ {} {}d", target, decision.action());
        Ok(())
    }

    fn contains(&self, target: ReviewTarget) -> bool {
        match target {
            ReviewTarget::Request(id) => self.requests.iter().any(|r| r.request_id == id),
            ReviewTarget::ChangeRequest(id) => self.change_requests.iter().any(|c| c.change_request_id == id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::traits::portal_api::MockPortalApi;

    fn pending_request(id: i64) -> ServerRequest {
        serde_json::from_value(json!({"requestId": id, "status": "PENDING"})).unwrap()
    }

    fn pending_change(id: i64) -> ChangeRequestRecord {
        serde_json::from_value(json!({
            "changeRequestId": id,
            "requestId": 1,
            "changeType": "VOLUME_SIZE",
            "status": "PENDING",
            "newValue": "500"
        }))
        .unwrap()
    }

    fn with_queues(mut api: MockPortalApi) -> MockPortalApi {
        api.expect_pending_requests()
            .returning(|| Ok(vec![pending_request(1), pending_request(2)]));
        api.expect_pending_change_requests()
            .returning(|| Ok(vec![pending_change(10)]));
        api
    }

    #[tokio::test]
    async fn approve_removes_item_on_success() {
        let mut api = MockPortalApi::new();
        api.expect_review()
            .withf(|target, decision| *target == ReviewTarget::Request(2) && matches!(decision, ReviewDecision::Approve))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut review = AdminReviewController::new(Arc::new(with_queues(api)));

        assert_eq!(review.refresh().await.unwrap(), 3);
        review.approve(ReviewTarget::Request(2)).await.unwrap();
        let ids: Vec<i64> = review.pending_requests().iter().map(|r| r.request_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn failed_review_keeps_queue() {
        let mut api = MockPortalApi::new();
        api.expect_review()
            .returning(|_, _| Err(PortalError::api("POST /api/admin", 500, "boom")));
        let mut review = AdminReviewController::new(Arc::new(with_queues(api)));
        review.refresh().await.unwrap();

        assert!(review.approve(ReviewTarget::ChangeRequest(10)).await.is_err());
        assert_eq!(review.pending_change_requests().len(), 1);
    }

    #[tokio::test]
    async fn deny_requires_reason() {
        let mut api = MockPortalApi::new();
        api.expect_review().never();
        let mut review = AdminReviewController::new(Arc::new(with_queues(api)));
        review.refresh().await.unwrap();

        let err = review.deny(ReviewTarget::Request(1), "   ").await.unwrap_err();
        assert!(matches!(err, PortalError::Validation { .. }));
        assert_eq!(review.pending_requests().len(), 2);
    }

    #[tokio::test]
    async fn deny_sends_trimmed_reason() {
        let mut api = MockPortalApi::new();
        api.expect_review()
            .withf(|_, decision| matches!(decision, ReviewDecision::Reject { reason } if reason.as_str() == "no budget"))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut review = AdminReviewController::new(Arc::new(with_queues(api)));
        review.refresh().await.unwrap();

        review.deny(ReviewTarget::Request(1), "  no budget ").await.unwrap();
        assert_eq!(review.pending_requests().len(), 1);
    }

    #[tokio::test]
    async fn unknown_item_is_rejected_locally() {
        let mut api = MockPortalApi::new();
        api.expect_review().never();
        let mut review = AdminReviewController::new(Arc::new(with_queues(api)));
        review.refresh().await.unwrap();

        let err = review.approve(ReviewTarget::Request(99)).await.unwrap_err();
        assert!(matches!(err, PortalError::UnknownReviewItem { id: 99, .. }));
    }
}
