use crate::enums::change_value::ChangeValue;
use crate::enums::changeable_field::ChangeableField;

/// Work-in-progress change request. The selected field is the variant of
/// `value`, so there is no separate field tag to fall out of sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequestDraft {
    pub target_request_id: Option<i64>,
    pub value: Option<ChangeValue>,
    pub justification: String,
}

impl ChangeRequestDraft {
    pub fn field(&self) -> Option<ChangeableField> {
        self.value.as_ref().map(ChangeValue::field)
    }
}
