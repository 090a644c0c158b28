use std::sync::Arc;
use crate::errors::PortalResult;
use crate::services::group_catalog::GroupCatalog;
use crate::structs::change_request_record::ChangeRequestRecord;
use crate::structs::container_image::ContainerImage;
use crate::structs::resource_catalog::ResourceCatalog;
use crate::structs::resource_group::ResourceGroup;
use crate::structs::server_request::ServerRequest;
use crate::traits::portal_api::PortalApi;

/// Loads the read-only reference data behind the selection lists.
pub struct CatalogLoader {
    api: Arc<dyn PortalApi>,
}

impl CatalogLoader {
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    pub async fn load_resource_groups(&self) -> PortalResult<Vec<ResourceGroup>> {
        let groups = self.api.resource_groups().await?;
        log::debug!("Loaded {} resource groups", groups.len());
        Ok(groups)
    }

    pub async fn load_images(&self) -> PortalResult<Vec<ContainerImage>> {
        let images = self.api.images().await?;
        log::debug!("Loaded {} container images", images.len());
        Ok(images)
    }

    /// Refreshes `catalog` in place so every editor holding it sees the result.
    pub async fn load_groups(&self, catalog: &GroupCatalog) -> PortalResult<usize> {
        let groups = self.api.groups().await?;
        catalog.replace_all(groups);
        log::debug!("Loaded {} Unix groups", catalog.len());
        Ok(catalog.len())
    }

    pub async fn load_my_requests(&self) -> PortalResult<Vec<ServerRequest>> {
        self.api.my_requests().await
    }

    pub async fn load_my_change_requests(&self) -> PortalResult<Vec<ChangeRequestRecord>> {
        self.api.my_change_requests().await
    }

    /// Loads the three catalogs concurrently. On any failure nothing is replaced.
    pub async fn load_all(&self, catalog: &GroupCatalog) -> PortalResult<ResourceCatalog> {
        let (resource_groups, images, groups) = futures::try_join!(
            self.api.resource_groups(),
            self.api.images(),
            self.api.groups(),
        )?;
        catalog.replace_all(groups);

        Ok(ResourceCatalog {
            resource_groups,
            images,
            groups: catalog.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PortalError;
    use crate::structs::available_group::AvailableGroup;
    use crate::traits::portal_api::MockPortalApi;

    fn group(id: i64, name: &str) -> AvailableGroup {
        AvailableGroup {
            group_id: id,
            group_name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn load_all_fills_shared_catalog() {
        let mut api = MockPortalApi::new();
        api.expect_resource_groups().returning(|| Ok(vec![]));
        api.expect_images().returning(|| Ok(vec![]));
        api.expect_groups().returning(|| Ok(vec![group(1, "vision"), group(2, "nlp")]));

        let catalog = GroupCatalog::default();
        let loader = CatalogLoader::new(Arc::new(api));
        let loaded = loader.load_all(&catalog).await.unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(loaded.groups.len(), 2);
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_groups() {
        let mut api = MockPortalApi::new();
        api.expect_resource_groups().returning(|| Ok(vec![]));
        api.expect_images()
            .returning(|| Err(PortalError::network("GET /api/images", None, "refused")));
        api.expect_groups().returning(|| Ok(vec![group(5, "new")]));

        let catalog = GroupCatalog::new(vec![group(1, "vision")]);
        let loader = CatalogLoader::new(Arc::new(api));
        assert!(loader.load_all(&catalog).await.is_err());
        assert_eq!(catalog.snapshot(), vec![group(1, "vision")]);
    }
}
