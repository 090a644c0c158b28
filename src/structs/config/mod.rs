pub mod api_config;
pub mod config;
pub mod display_config;
pub mod storage_config;
