use crate::config::constants::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::enums::sort_order::SortOrder;

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        DEFAULT_API_BASE_URL.to_string()
    }

    pub fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT_SECS
    }

    pub fn default_user_agent() -> String {
        format!("gpulab/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn default_sort() -> SortOrder {
        SortOrder::Newest
    }

    pub fn default_page_size() -> usize {
        DEFAULT_PAGE_SIZE
    }
}
