use serde::Serialize;
use crate::enums::change_type::ChangeType;

/// Body of `POST /api/change-requests/{requestId}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestSubmission {
    #[serde(skip)]
    pub target_request_id: i64,
    pub change_type: ChangeType,
    pub new_value: serde_json::Value,
    pub reason: String,
}
