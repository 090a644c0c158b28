pub mod group_selection;
pub mod portal_api;
pub mod token_store;
