//! Child Events
//!
//! Discrete notifications delivered to live subscribers of a child query.
//! Events are emitted at mutation points:
//! - A child enters the queried range (or was present at subscribe time)
//! - A child already in the range is overwritten
//! - A child leaves the range or is deleted outright

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Events emitted by the store for a subscribed child query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChildEvent {
    /// A child entered the queried range.
    ///
    /// Emitted for every matching child when a subscription starts, then
    /// for children whose writes bring them into the range.
    Added {
        /// Child key under the queried path
        key: String,
        /// Materialized child value
        value: Value,
    },

    /// A child already in the range was overwritten.
    ///
    /// Last write wins; no merging is performed.
    Changed {
        /// Child key under the queried path
        key: String,
        /// New child value
        value: Value,
    },

    /// A child left the range or was removed from the store
    Removed {
        /// Child key under the queried path
        key: String,
    },
}

impl ChildEvent {
    /// The child key this event concerns
    pub fn key(&self) -> &str {
        match self {
            ChildEvent::Added { key, .. }
            | ChildEvent::Changed { key, .. }
            | ChildEvent::Removed { key } => key,
        }
    }
}
