use std::fmt;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use crate::enums::change_type::ChangeType;

/// Attribute of a provisioned server that a change request modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ChangeableField {
    VolumeSize,
    ExpiresAt,
    ResourceGroup,
    ContainerImage,
    GroupMembership,
    PortMapping,
}

impl ChangeableField {
    pub const ALL: [ChangeableField; 6] = [
        Self::VolumeSize,
        Self::ExpiresAt,
        Self::ResourceGroup,
        Self::ContainerImage,
        Self::GroupMembership,
        Self::PortMapping,
    ];

    pub fn change_type(&self) -> ChangeType {
        match self {
            Self::VolumeSize => ChangeType::VolumeSize,
            Self::ExpiresAt => ChangeType::ExpiresAt,
            Self::ResourceGroup => ChangeType::ResourceGroup,
            Self::ContainerImage => ChangeType::ImageId,
            Self::GroupMembership => ChangeType::Group,
            Self::PortMapping => ChangeType::Port,
        }
    }

    /// List-valued fields are edited through the group and port sub-editors.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::GroupMembership | Self::PortMapping)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VolumeSize => "volume size",
            Self::ExpiresAt => "expiry date",
            Self::ResourceGroup => "GPU resource group",
            Self::ContainerImage => "container image",
            Self::GroupMembership => "Unix groups",
            Self::PortMapping => "port mapping",
        }
    }
}

impl fmt::Display for ChangeableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
