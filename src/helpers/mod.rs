pub mod config_helper;
pub mod draft_validator;
pub mod submission_gate;
