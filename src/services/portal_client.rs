use async_trait::async_trait;
use serde_json::json;
use crate::config::constants::{
    change_request_path, ADMIN_CHANGE_REQUESTS_PATH, ADMIN_REQUESTS_PATH, CURRENT_USER_PATH, GROUPS_PATH,
    IMAGES_PATH, LOGIN_PATH, MY_CHANGE_REQUESTS_PATH, MY_REQUESTS_PATH, REQUESTS_PATH, RESOURCE_GROUPS_PATH,
};
use crate::enums::review_decision::ReviewDecision;
use crate::enums::review_target::ReviewTarget;
use crate::errors::{PortalError, PortalResult};
use crate::services::http_gateway::HttpGateway;
use crate::structs::api_response::ApiReply;
use crate::structs::available_group::{AvailableGroup, CreateGroupRequest};
use crate::structs::change_request_record::ChangeRequestRecord;
use crate::structs::change_request_submission::ChangeRequestSubmission;
use crate::structs::container_image::ContainerImage;
use crate::structs::credentials::Credentials;
use crate::structs::resource_group::ResourceGroup;
use crate::structs::server_request::ServerRequest;
use crate::structs::server_request_submission::ServerRequestSubmission;
use crate::structs::token_pair::TokenPair;
use crate::structs::user::User;
use crate::traits::portal_api::PortalApi;

/// [`PortalApi`] over the live REST API.
#[derive(Clone)]
pub struct PortalClient {
    gateway: HttpGateway,
}

impl PortalClient {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &HttpGateway {
        &self.gateway
    }
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn login(&self, credentials: &Credentials) -> PortalResult<TokenPair> {
        self.gateway.post_login(LOGIN_PATH, credentials).await
    }

    async fn current_user(&self) -> PortalResult<User> {
        self.gateway.get(CURRENT_USER_PATH).await
    }

    async fn resource_groups(&self) -> PortalResult<Vec<ResourceGroup>> {
        self.gateway.get_list(RESOURCE_GROUPS_PATH).await
    }

    async fn images(&self) -> PortalResult<Vec<ContainerImage>> {
        self.gateway.get_list(IMAGES_PATH).await
    }

    async fn groups(&self) -> PortalResult<Vec<AvailableGroup>> {
        self.gateway.get_list(GROUPS_PATH).await
    }

    async fn create_group(&self, group_name: &str) -> PortalResult<AvailableGroup> {
        let body = CreateGroupRequest {
            group_name: group_name.to_string(),
        };
        let reply: ApiReply<AvailableGroup> = self.gateway.post(GROUPS_PATH, &body).await?;
        if reply.status != 201 {
            return Err(PortalError::api(
                &format!("POST {}", GROUPS_PATH),
                reply.status,
                "group was not created",
            ));
        }
        Ok(reply.body)
    }

    async fn my_requests(&self) -> PortalResult<Vec<ServerRequest>> {
        self.gateway.get_list(MY_REQUESTS_PATH).await
    }

    async fn my_change_requests(&self) -> PortalResult<Vec<ChangeRequestRecord>> {
        self.gateway.get_list(MY_CHANGE_REQUESTS_PATH).await
    }

    async fn create_request(&self, submission: &ServerRequestSubmission) -> PortalResult<()> {
        self.gateway.post_empty(REQUESTS_PATH, submission).await?;
        Ok(())
    }

    async fn create_change_request(&self, submission: &ChangeRequestSubmission) -> PortalResult<()> {
        let path = change_request_path(submission.target_request_id);
        self.gateway.post_empty(&path, submission).await?;
        Ok(())
    }

    async fn pending_requests(&self) -> PortalResult<Vec<ServerRequest>> {
        self.gateway
            .get_list(&format!("{}?status=PENDING", ADMIN_REQUESTS_PATH))
            .await
    }

    async fn pending_change_requests(&self) -> PortalResult<Vec<ChangeRequestRecord>> {
        self.gateway
            .get_list(&format!("{}?status=PENDING", ADMIN_CHANGE_REQUESTS_PATH))
            .await
    }

    async fn review(&self, target: ReviewTarget, decision: &ReviewDecision) -> PortalResult<()> {
        let path = target.action_path(decision.action());
        let body = match decision {
            ReviewDecision::Approve => json!({}),
            ReviewDecision::Reject { reason } => json!({ "reason": reason }),
        };
        self.gateway.post_empty(&path, &body).await?;
        Ok(())
    }
}
