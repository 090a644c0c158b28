use serde::{Deserialize, Serialize};

/// A named pool of GPU hardware a request can be bound to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub resource_group_id: i64,
    pub description: String,
    #[serde(default)]
    pub gpu_model: Option<String>,
    #[serde(default)]
    pub gpu_memory_gib: Option<u32>,
    #[serde(default)]
    pub available: Option<bool>,
}
