use crate::enums::request_status::RequestStatus;
use crate::enums::sort_order::SortOrder;

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub status: Option<RequestStatus>,
    pub search: Option<String>,
    pub sort: SortOrder,
    pub limit: Option<usize>,
}
