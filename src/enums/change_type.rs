use serde::{Deserialize, Serialize};
use crate::enums::changeable_field::ChangeableField;

/// Wire-level change-type tag of `POST /api/change-requests/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    VolumeSize,
    ExpiresAt,
    ResourceGroup,
    ImageId,
    Group,
    Port,
}

impl ChangeType {
    pub fn field(&self) -> ChangeableField {
        match self {
            Self::VolumeSize => ChangeableField::VolumeSize,
            Self::ExpiresAt => ChangeableField::ExpiresAt,
            Self::ResourceGroup => ChangeableField::ResourceGroup,
            Self::ImageId => ChangeableField::ContainerImage,
            Self::Group => ChangeableField::GroupMembership,
            Self::Port => ChangeableField::PortMapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_tags_match_portal_contract() {
        let tags: Vec<String> = ChangeableField::ALL
            .iter()
            .map(|f| serde_json::to_string(&f.change_type()).unwrap())
            .collect();
        assert_eq!(
            tags,
            vec![
                "\"VOLUME_SIZE\"",
                "\"EXPIRES_AT\"",
                "\"RESOURCE_GROUP\"",
                "\"IMAGE_ID\"",
                "\"GROUP\"",
                "\"PORT\"",
            ]
        );
    }

    #[test]
    fn wire_tag_maps_back_to_field() {
        for field in ChangeableField::ALL {
            assert_eq!(field.change_type().field(), field);
        }
    }
}
