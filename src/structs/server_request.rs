use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::enums::changeable_field::ChangeableField;
use crate::enums::request_status::RequestStatus;
use crate::structs::available_group::AvailableGroup;
use crate::structs::port_usage_record::PortUsageRecord;

/// A provisioning request as returned by the portal. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRequest {
    pub request_id: i64,
    pub status: RequestStatus,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub server_name: Option<String>,
    #[serde(default)]
    pub resource_group_id: Option<i64>,
    #[serde(default)]
    pub resource_group_name: Option<String>,
    #[serde(default)]
    pub image_id: Option<i64>,
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub volume_size_gib: Option<u32>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub port_mappings: Vec<PortUsageRecord>,
    #[serde(default)]
    pub groups: Vec<AvailableGroup>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Server-provided creation time. Absent from older portal builds.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ServerRequest {
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }

    pub fn display_name(&self) -> String {
        match &self.server_name {
            Some(name) if !name.is_empty() => format!("#{} {}", self.request_id, name),
            _ => format!("#{}", self.request_id),
        }
    }

    /// Human-readable current value of `field`, shown before editing.
    pub fn current_value(&self, field: ChangeableField) -> String {
        let unset = || "-".to_string();
        match field {
            ChangeableField::VolumeSize => self
                .volume_size_gib
                .map(|v| format!("{} GiB", v))
                .unwrap_or_else(unset),
            ChangeableField::ExpiresAt => self.expires_at.clone().unwrap_or_else(unset),
            ChangeableField::ResourceGroup => match (&self.resource_group_name, self.resource_group_id) {
                (Some(name), _) => name.clone(),
                (None, Some(id)) => id.to_string(),
                (None, None) => unset(),
            },
            ChangeableField::ContainerImage => match (&self.image_name, self.image_id) {
                (Some(name), _) => name.clone(),
                (None, Some(id)) => id.to_string(),
                (None, None) => unset(),
            },
            ChangeableField::GroupMembership => {
                if self.groups.is_empty() {
                    return unset();
                }
                self.groups
                    .iter()
                    .map(|g| g.group_name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            ChangeableField::PortMapping => {
                if self.port_mappings.is_empty() {
                    return unset();
                }
                self.port_mappings
                    .iter()
                    .map(|p| format!("{} ({})", p.internal_port, p.usage_purpose))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }

    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        let haystacks = [
            self.server_name.as_deref(),
            self.user_name.as_deref(),
            self.resource_group_name.as_deref(),
            self.image_name.as_deref(),
            self.reason.as_deref(),
        ];
        self.request_id.to_string().contains(&needle)
            || haystacks
                .iter()
                .flatten()
                .any(|h| h.to_lowercase().contains(&needle))
    }
}
