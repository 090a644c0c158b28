use crate::errors::{PortalError, PortalResult};
use crate::services::group_catalog::GroupCatalog;
use crate::structs::available_group::AvailableGroup;
use crate::traits::group_selection::GroupSelection;
use crate::traits::portal_api::PortalApi;

/// Group picking shared by the new-request and change-request forms,
/// including inline creation of a new group.
#[derive(Clone)]
pub struct GroupEditor {
    catalog: GroupCatalog,
}

impl GroupEditor {
    pub fn new(catalog: GroupCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &GroupCatalog {
        &self.catalog
    }

    /// Appends `group_id` unless already present. Insertion order is kept.
    pub fn add_to(selection: &mut Vec<i64>, group_id: i64) -> bool {
        if selection.contains(&group_id) {
            return false;
        }
        selection.push(group_id);
        true
    }

    pub fn remove_from(selection: &mut Vec<i64>, group_id: i64) -> bool {
        let before = selection.len();
        selection.retain(|id| *id != group_id);
        before != selection.len()
    }

    /// Client-side checks; returns the name to send.
    pub fn check_name(&self, name: &str) -> PortalResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PortalError::group_rejected(name, "name must not be blank"));
        }
        if self.catalog.contains_name(name) {
            return Err(PortalError::group_rejected(name, "a group with this name already exists"));
        }
        Ok(name.to_string())
    }

    /// Creates a group and selects it in `selection`.
    ///
    /// The catalog and the selection are only touched after the portal
    /// answered `201 Created`; any failure leaves both as they were.
    pub async fn create_group(
        &self,
        api: &dyn PortalApi,
        name: &str,
        selection: &mut dyn GroupSelection,
    ) -> PortalResult<AvailableGroup> {
        let name = self.check_name(name)?;
        if !selection.accepts_groups() {
            return Err(PortalError::field_mismatch("create group", "a field without groups"));
        }

        let group = match api.create_group(&name).await {
            Ok(group) => group,
            Err(e) => {
                log::warn!("⚠️ Group '{}' was not created: {}", name, e);
                return Err(e);
            }
        };

        self.catalog.append(group.clone());
        selection.select_group(group.group_id)?;
        log::info!("👥 Created group '{}' (#{})", group.group_name, group.group_id);
        Ok(group)
    }
}
