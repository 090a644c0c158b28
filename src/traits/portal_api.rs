use async_trait::async_trait;
use crate::enums::review_decision::ReviewDecision;
use crate::enums::review_target::ReviewTarget;
use crate::errors::PortalResult;
use crate::structs::available_group::AvailableGroup;
use crate::structs::change_request_record::ChangeRequestRecord;
use crate::structs::change_request_submission::ChangeRequestSubmission;
use crate::structs::container_image::ContainerImage;
use crate::structs::credentials::Credentials;
use crate::structs::resource_group::ResourceGroup;
use crate::structs::server_request::ServerRequest;
use crate::structs::server_request_submission::ServerRequestSubmission;
use crate::structs::token_pair::TokenPair;
use crate::structs::user::User;

/// The portal's REST contract as seen by the controllers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortalApi: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> PortalResult<TokenPair>;

    async fn current_user(&self) -> PortalResult<User>;

    async fn resource_groups(&self) -> PortalResult<Vec<ResourceGroup>>;

    async fn images(&self) -> PortalResult<Vec<ContainerImage>>;

    async fn groups(&self) -> PortalResult<Vec<AvailableGroup>>;

    /// Succeeds only on `201 Created`.
    async fn create_group(&self, group_name: &str) -> PortalResult<AvailableGroup>;

    async fn my_requests(&self) -> PortalResult<Vec<ServerRequest>>;

    async fn my_change_requests(&self) -> PortalResult<Vec<ChangeRequestRecord>>;

    async fn create_request(&self, submission: &ServerRequestSubmission) -> PortalResult<()>;

    async fn create_change_request(&self, submission: &ChangeRequestSubmission) -> PortalResult<()>;

    async fn pending_requests(&self) -> PortalResult<Vec<ServerRequest>>;

    async fn pending_change_requests(&self) -> PortalResult<Vec<ChangeRequestRecord>>;

    async fn review(&self, target: ReviewTarget, decision: &ReviewDecision) -> PortalResult<()>;
}
