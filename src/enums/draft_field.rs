use serde::{Deserialize, Serialize};

/// Keys of the field-keyed validation error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Target,
    Field,
    Value,
    ResourceGroup,
    Image,
    VolumeSize,
    ExpiresAt,
    Ports,
    Groups,
    Justification,
}

impl DraftField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Target => "Target request",
            Self::Field => "Field to change",
            Self::Value => "New value",
            Self::ResourceGroup => "GPU resource group",
            Self::Image => "Container image",
            Self::VolumeSize => "Volume size",
            Self::ExpiresAt => "Expiry date",
            Self::Ports => "Ports",
            Self::Groups => "Unix groups",
            Self::Justification => "Justification",
        }
    }
}
