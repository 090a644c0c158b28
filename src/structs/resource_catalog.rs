use crate::services::group_catalog::GroupCatalog;
use crate::structs::container_image::ContainerImage;
use crate::structs::resource_group::ResourceGroup;

/// Everything the request forms offer for selection.
#[derive(Clone, Default)]
pub struct ResourceCatalog {
    pub resource_groups: Vec<ResourceGroup>,
    pub images: Vec<ContainerImage>,
    pub groups: GroupCatalog,
}

impl ResourceCatalog {
    pub fn resource_group(&self, id: i64) -> Option<&ResourceGroup> {
        self.resource_groups.iter().find(|g| g.resource_group_id == id)
    }

    pub fn image(&self, id: i64) -> Option<&ContainerImage> {
        self.images.iter().find(|i| i.image_id == id)
    }
}
