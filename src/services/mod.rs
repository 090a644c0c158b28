pub mod admin_review;
pub mod auth_session;
pub mod catalog_loader;
pub mod change_request_controller;
pub mod group_catalog;
pub mod group_editor;
pub mod http_gateway;
pub mod port_editor;
pub mod portal_client;
pub mod request_form_controller;
pub mod request_list;
pub mod session_expiry;
pub mod token_store;
