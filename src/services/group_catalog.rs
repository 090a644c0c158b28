use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::structs::available_group::AvailableGroup;

/// The shared list of available Unix groups. Clones are handles to the same
/// list, so a group created from one editor is visible to every other editor.
#[derive(Clone, Default)]
pub struct GroupCatalog {
    groups: Arc<RwLock<Vec<AvailableGroup>>>,
}

impl GroupCatalog {
    pub fn new(groups: Vec<AvailableGroup>) -> Self {
        let catalog = Self::default();
        catalog.replace_all(groups);
        catalog
    }

    /// Replaces the list with a freshly loaded one, keeping the first entry per id.
    pub fn replace_all(&self, groups: Vec<AvailableGroup>) {
        let mut deduped: Vec<AvailableGroup> = Vec::with_capacity(groups.len());
        for group in groups {
            if !deduped.iter().any(|g| g.group_id == group.group_id) {
                deduped.push(group);
            }
        }
        *self.write() = deduped;
    }

    /// Adds a newly created group. Returns `false` if the id is already listed.
    pub fn append(&self, group: AvailableGroup) -> bool {
        let mut groups = self.write();
        if groups.iter().any(|g| g.group_id == group.group_id) {
            return false;
        }
        groups.push(group);
        true
    }

    pub fn snapshot(&self) -> Vec<AvailableGroup> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn find(&self, group_id: i64) -> Option<AvailableGroup> {
        self.read().iter().find(|g| g.group_id == group_id).cloned()
    }

    /// Exact, case-sensitive name lookup.
    pub fn contains_name(&self, name: &str) -> bool {
        self.read().iter().any(|g| g.group_name == name)
    }

    pub fn names_for(&self, ids: &[i64]) -> Vec<String> {
        let groups = self.read();
        ids.iter()
            .map(|id| {
                groups
                    .iter()
                    .find(|g| g.group_id == *id)
                    .map(|g| g.group_name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AvailableGroup>> {
        self.groups.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AvailableGroup>> {
        self.groups.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
