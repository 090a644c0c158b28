use serde::Serialize;
use crate::structs::port_usage_record::PortUsageRecord;

/// Body of `POST /api/requests`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRequestSubmission {
    pub resource_group_id: i64,
    pub image_id: i64,
    pub volume_size: u32,
    pub expires_at: String,
    pub port_mappings: Vec<PortUsageRecord>,
    pub group_ids: Vec<i64>,
    pub reason: String,
}
