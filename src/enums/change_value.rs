use serde_json::json;
use crate::enums::changeable_field::ChangeableField;
use crate::structs::port_usage_record::PortUsageRecord;

/// The edited value of a change-request draft. The variant is the field
/// being changed, so a value can never outlive a field switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeValue {
    VolumeSize(String),
    ExpiresAt(String),
    ResourceGroup(String),
    ContainerImage(String),
    GroupMembership(Vec<i64>),
    PortMapping(Vec<PortUsageRecord>),
}

impl ChangeValue {
    pub fn empty_for(field: ChangeableField) -> Self {
        match field {
            ChangeableField::VolumeSize => Self::VolumeSize(String::new()),
            ChangeableField::ExpiresAt => Self::ExpiresAt(String::new()),
            ChangeableField::ResourceGroup => Self::ResourceGroup(String::new()),
            ChangeableField::ContainerImage => Self::ContainerImage(String::new()),
            ChangeableField::GroupMembership => Self::GroupMembership(Vec::new()),
            ChangeableField::PortMapping => Self::PortMapping(Vec::new()),
        }
    }

    pub fn field(&self) -> ChangeableField {
        match self {
            Self::VolumeSize(_) => ChangeableField::VolumeSize,
            Self::ExpiresAt(_) => ChangeableField::ExpiresAt,
            Self::ResourceGroup(_) => ChangeableField::ResourceGroup,
            Self::ContainerImage(_) => ChangeableField::ContainerImage,
            Self::GroupMembership(_) => ChangeableField::GroupMembership,
            Self::PortMapping(_) => ChangeableField::PortMapping,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::VolumeSize(s) | Self::ExpiresAt(s) | Self::ResourceGroup(s) | Self::ContainerImage(s) => {
                s.trim().is_empty()
            }
            Self::GroupMembership(ids) => ids.is_empty(),
            Self::PortMapping(ports) => ports.is_empty(),
        }
    }

    pub fn scalar(&self) -> Option<&str> {
        match self {
            Self::VolumeSize(s) | Self::ExpiresAt(s) | Self::ResourceGroup(s) | Self::ContainerImage(s) => {
                Some(s.as_str())
            }
            _ => None,
        }
    }

    pub fn scalar_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::VolumeSize(s) | Self::ExpiresAt(s) | Self::ResourceGroup(s) | Self::ContainerImage(s) => Some(s),
            _ => None,
        }
    }

    pub fn groups(&self) -> Option<&[i64]> {
        match self {
            Self::GroupMembership(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn groups_mut(&mut self) -> Option<&mut Vec<i64>> {
        match self {
            Self::GroupMembership(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn ports(&self) -> Option<&[PortUsageRecord]> {
        match self {
            Self::PortMapping(ports) => Some(ports),
            _ => None,
        }
    }

    pub fn ports_mut(&mut self) -> Option<&mut Vec<PortUsageRecord>> {
        match self {
            Self::PortMapping(ports) => Some(ports),
            _ => None,
        }
    }

    /// Serialized form sent as `newValue`. Scalars go out as the trimmed raw text.
    pub fn to_wire(&self) -> serde_json::Value {
        match self {
            Self::VolumeSize(s) | Self::ExpiresAt(s) | Self::ResourceGroup(s) | Self::ContainerImage(s) => {
                json!(s.trim())
            }
            Self::GroupMembership(ids) => json!(ids),
            Self::PortMapping(ports) => json!(ports),
        }
    }
}
