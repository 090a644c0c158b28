pub mod auth_state;
pub mod change_type;
pub mod change_value;
pub mod changeable_field;
pub mod commands;
pub mod draft_field;
pub mod inline_edit_event;
pub mod request_status;
pub mod review_decision;
pub mod review_target;
pub mod sort_order;
pub mod submit_outcome;
