use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::change_type::ChangeType;
use crate::enums::request_status::RequestStatus;

/// A change request as returned by the portal's list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestRecord {
    pub change_request_id: i64,
    pub request_id: i64,
    pub change_type: ChangeType,
    pub status: RequestStatus,
    #[serde(default)]
    pub old_value: Option<serde_json::Value>,
    #[serde(default)]
    pub new_value: serde_json::Value,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChangeRequestRecord {
    pub fn new_value_text(&self) -> String {
        match &self.new_value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }

    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.request_id.to_string().contains(&needle)
            || self.change_request_id.to_string().contains(&needle)
            || self.new_value_text().to_lowercase().contains(&needle)
            || [self.reason.as_deref(), self.user_name.as_deref()]
                .iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle))
    }
}
