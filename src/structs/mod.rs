pub mod api_response;
pub mod available_group;
pub mod change_request_draft;
pub mod change_request_record;
pub mod change_request_submission;
pub mod cli;
pub mod config;
pub mod container_image;
pub mod credentials;
pub mod list_query;
pub mod port_usage_record;
pub mod resource_catalog;
pub mod resource_group;
pub mod server_request;
pub mod server_request_draft;
pub mod server_request_submission;
pub mod session_expired_event;
pub mod submission_ticket;
pub mod token_pair;
pub mod user;
