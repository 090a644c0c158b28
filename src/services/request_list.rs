use std::cmp::Ordering;
use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use crate::enums::request_status::RequestStatus;
use crate::enums::sort_order::SortOrder;
use crate::structs::change_request_record::ChangeRequestRecord;
use crate::structs::list_query::ListQuery;
use crate::structs::server_request::ServerRequest;

/// Something that can be listed, filtered and sorted.
pub trait Listable {
    fn id(&self) -> i64;
    fn status(&self) -> RequestStatus;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn matches_text(&self, needle: &str) -> bool;
}

impl Listable for ServerRequest {
    fn id(&self) -> i64 {
        self.request_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn matches_text(&self, needle: &str) -> bool {
        ServerRequest::matches_text(self, needle)
    }
}

impl Listable for ChangeRequestRecord {
    fn id(&self) -> i64 {
        self.change_request_id
    }

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn matches_text(&self, needle: &str) -> bool {
        ChangeRequestRecord::matches_text(self, needle)
    }
}

/// Read-only view with client-side filtering and sorting.
pub struct ListView<T> {
    items: Vec<T>,
}

pub type RequestListView = ListView<ServerRequest>;
pub type ChangeRequestListView = ListView<ChangeRequestRecord>;

impl<T: Listable> ListView<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn query(&self, query: &ListQuery) -> Vec<&T> {
        let needle = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let mut rows: Vec<&T> = self
            .items
            .iter()
            .filter(|item| query.status.map_or(true, |s| item.status() == s))
            .filter(|item| needle.map_or(true, |n| item.matches_text(n)))
            .collect();

        rows.sort_by(|a, b| compare(*a, *b, query.sort));
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        rows
    }

    pub fn status_counts(&self) -> BTreeMap<RequestStatus, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.status()).or_insert(0) += 1;
        }
        counts
    }
}

// Undated items go last for both date orders; ties fall back to id.
fn compare<T: Listable>(a: &T, b: &T, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::Newest => by_date(a, b, true).then_with(|| b.id().cmp(&a.id())),
        SortOrder::Oldest => by_date(a, b, false).then_with(|| a.id().cmp(&b.id())),
        SortOrder::Id => a.id().cmp(&b.id()),
        SortOrder::Status => a.status().cmp(&b.status()).then_with(|| a.id().cmp(&b.id())),
    }
}

fn by_date<T: Listable>(a: &T, b: &T, newest_first: bool) -> Ordering {
    match (a.created_at(), b.created_at()) {
        (Some(x), Some(y)) if newest_first => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
