//! Dashboard view derivations over a flat list of orders.
//!
//! Every function here is pure: it takes the order list as last fetched (newest
//! first) and reshapes it without reordering orders relative to each other.

use crate::core::{
    cart::CartLine,
    order::Order,
    status::{OrderStatus, StatusBucket},
};
use sea_orm::prelude::Json;
use std::collections::BTreeMap;
use tracing::warn;

/// Number of line items shown on a dashboard card before collapsing the rest.
pub const PREVIEW_LINES: usize = 3;

/// The stored shape of an order's item list.
///
/// The column is untyped JSON: writers may have stored the list itself or the list
/// encoded as a JSON string. [`StoredItems::parse`] resolves either form.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredItems {
    /// The list encoded as text
    Text(String),
    /// Any other JSON value, expected to be the list itself
    Structured(Json),
}

impl From<Json> for StoredItems {
    fn from(value: Json) -> Self {
        match value {
            Json::String(text) => Self::Text(text),
            other => Self::Structured(other),
        }
    }
}

impl StoredItems {
    /// Decodes the line items, yielding an empty list when the value is malformed.
    #[must_use]
    pub fn parse(self) -> Vec<CartLine> {
        let parsed = match self {
            Self::Text(text) => serde_json::from_str(&text),
            Self::Structured(value) => serde_json::from_value(value),
        };
        parsed.unwrap_or_else(|e| {
            warn!("Stored order items could not be parsed, showing none: {}", e);
            Vec::new()
        })
    }
}

/// Orders split into the three dashboard buckets, each in list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBuckets<'a> {
    /// Orders with status `pending`
    pub pending: Vec<&'a Order>,
    /// Orders with status `inprogress`, `slow` or `delay`
    pub in_progress: Vec<&'a Order>,
    /// Orders with status `complete`
    pub complete: Vec<&'a Order>,
}

impl<'a> StatusBuckets<'a> {
    /// Orders in one bucket.
    #[must_use]
    pub fn bucket(&self, bucket: StatusBucket) -> &[&'a Order] {
        match bucket {
            StatusBucket::Pending => &self.pending,
            StatusBucket::InProgress => &self.in_progress,
            StatusBucket::Complete => &self.complete,
        }
    }

    /// Total number of orders across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len() + self.in_progress.len() + self.complete.len()
    }

    /// Whether every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `orders` into status buckets in a single pass.
///
/// Every order lands in exactly one bucket. The in-progress bucket keeps list
/// order across `inprogress`, `slow` and `delay` rather than grouping by status,
/// so newer orders stay on top whatever their label.
#[must_use]
pub fn bucket_by_status(orders: &[Order]) -> StatusBuckets<'_> {
    let mut buckets = StatusBuckets::default();
    for order in orders {
        match order.status.bucket() {
            StatusBucket::Pending => buckets.pending.push(order),
            StatusBucket::InProgress => buckets.in_progress.push(order),
            StatusBucket::Complete => buckets.complete.push(order),
        }
    }
    buckets
}

/// Orders with exactly `status`, in list order.
#[must_use]
pub fn filter_by_status(orders: &[Order], status: OrderStatus) -> Vec<&Order> {
    orders
        .iter()
        .filter(|order| order.status == status)
        .collect()
}

/// Groups `orders` by table number. Keys iterate in ascending table order and each
/// group keeps list order.
#[must_use]
pub fn group_by_table(orders: &[Order]) -> BTreeMap<i32, Vec<&Order>> {
    let mut grouped: BTreeMap<i32, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        grouped.entry(order.table_number).or_default().push(order);
    }
    grouped
}

/// The first few line items of an order plus how many were left out.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPreview<'a> {
    /// Items to show
    pub shown: &'a [CartLine],
    /// Items not shown
    pub hidden: usize,
}

/// Preview of at most [`PREVIEW_LINES`] items for a dashboard card.
#[must_use]
pub fn preview_items(items: &[CartLine]) -> ItemPreview<'_> {
    let shown = &items[..items.len().min(PREVIEW_LINES)];
    ItemPreview {
        shown,
        hidden: items.len() - shown.len(),
    }
}
