use serde::{Deserialize, Serialize};
use crate::enums::sort_order::SortOrder;
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "ConfigHelper::default_sort")]
    pub default_sort: SortOrder,

    #[serde(default = "ConfigHelper::default_page_size")]
    pub page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: ConfigHelper::default_sort(),
            page_size: ConfigHelper::default_page_size(),
        }
    }
}
