//! Ordered, bounded queries over the direct children of a path.

use crate::path::StorePath;
use serde_json::Value;
use std::cmp::Ordering;

/// How children are ordered within a query
#[derive(Debug, Clone, PartialEq, Eq)]
enum OrderBy {
    /// Order by child key
    Key,
    /// Order by a numeric field inside each child value
    Child(String),
}

/// A live-subscribable range query over the children of one path.
///
/// Children are ordered ascending by the order key (child key as the
/// tie-break), optionally bounded above by `end_at`, and the initial
/// snapshot can be truncated to the last `limit_to_last` entries, which
/// is the newest slice when ordering by a timestamp field.
///
/// `end_at` is only meaningful together with [`order_by_child`]
/// (numeric ordering); a missing or non-numeric order field sorts below
/// every bound.
///
/// [`order_by_child`]: ChildQuery::order_by_child
#[derive(Debug, Clone, PartialEq)]
pub struct ChildQuery {
    path: StorePath,
    order_by: OrderBy,
    end_at: Option<i64>,
    limit_to_last: Option<usize>,
}

impl ChildQuery {
    /// Query the direct children of `path`, ordered by key
    pub fn children(path: StorePath) -> Self {
        Self {
            path,
            order_by: OrderBy::Key,
            end_at: None,
            limit_to_last: None,
        }
    }

    /// Order children by a numeric field inside each value
    pub fn order_by_child(mut self, field: impl Into<String>) -> Self {
        self.order_by = OrderBy::Child(field.into());
        self
    }

    /// Keep only children whose order key is `<= bound` (inclusive)
    pub fn end_at(mut self, bound: i64) -> Self {
        self.end_at = Some(bound);
        self
    }

    /// Truncate the initial snapshot to the last `n` entries in query
    /// order. Live events are range-filtered only; the cap does not evict.
    pub fn limit_to_last(mut self, n: usize) -> Self {
        self.limit_to_last = Some(n);
        self
    }

    /// The queried path
    pub fn path(&self) -> &StorePath {
        &self.path
    }

    /// The configured snapshot cap, if any
    pub fn limit(&self) -> Option<usize> {
        self.limit_to_last
    }

    /// The configured upper bound, if any
    pub fn bound(&self) -> Option<i64> {
        self.end_at
    }

    /// Numeric order key of a child value; missing and non-numeric fields
    /// sort below everything
    pub(crate) fn order_key(&self, value: &Value) -> i64 {
        match &self.order_by {
            OrderBy::Key => 0,
            OrderBy::Child(field) => value.get(field).and_then(Value::as_i64).unwrap_or(i64::MIN),
        }
    }

    /// Whether a child value falls inside the queried range
    pub(crate) fn in_range(&self, value: &Value) -> bool {
        match self.end_at {
            Some(bound) => self.order_key(value) <= bound,
            None => true,
        }
    }

    /// Total query order over `(key, value)` pairs: order key ascending,
    /// then child key ascending
    pub(crate) fn compare(&self, a: (&str, &Value), b: (&str, &Value)) -> Ordering {
        self.order_key(a.1)
            .cmp(&self.order_key(b.1))
            .then_with(|| a.0.cmp(b.0))
    }
}
