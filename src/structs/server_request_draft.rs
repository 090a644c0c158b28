use crate::structs::port_usage_record::PortUsageRecord;

/// Work-in-progress application for a new GPU server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerRequestDraft {
    pub resource_group_id: Option<i64>,
    pub image_id: Option<i64>,
    pub volume_size: String,
    pub expires_at: String,
    pub ports: Vec<PortUsageRecord>,
    pub group_ids: Vec<i64>,
    pub justification: String,
}
