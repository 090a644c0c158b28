use crate::errors::PortalResult;

/// A draft that can hold a selection of Unix groups.
pub trait GroupSelection {
    /// Whether the draft currently has a group list to select into.
    fn accepts_groups(&self) -> bool;

    fn selected_groups(&self) -> &[i64];

    /// Adds `group_id` to the selection; `Ok(false)` if it was already selected.
    fn select_group(&mut self, group_id: i64) -> PortalResult<bool>;
}

/// A bare selection with no surrounding draft.
impl GroupSelection for Vec<i64> {
    fn accepts_groups(&self) -> bool {
        true
    }

    fn selected_groups(&self) -> &[i64] {
        self
    }

    fn select_group(&mut self, group_id: i64) -> PortalResult<bool> {
        if self.contains(&group_id) {
            return Ok(false);
        }
        self.push(group_id);
        Ok(true)
    }
}
