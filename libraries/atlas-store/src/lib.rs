//! Atlas Directory Store
//!
//! In-process realtime key-value store for the Atlas directory service.
//!
//! Values live in an explicit tree keyed by path segments (not concatenated
//! strings), and the store pushes discrete add/change/remove notifications
//! to live subscribers of ordered child queries. This is the ordered
//! key-value database the rest of the system is written against.
//!
//! # Architecture
//!
//! - **Tree**: a mapping from path-segment sequences to nodes, supporting
//!   get/set/delete/exists by path.
//! - **Push keys**: store-assigned, lexicographically and temporally
//!   increasing child keys.
//! - **Child queries**: bounded, ordered range queries over the direct
//!   children of a path.
//! - **Subscriptions**: per-query event channels delivering
//!   [`ChildEvent`]s; dropping the handle unregisters it immediately.
//! - **Vertical slices**: entity gateways (currently [`users`]) own their
//!   own paths and (de)serialization.
//!
//! # Example
//!
//! ```rust
//! use atlas_store::{ChildQuery, RealtimeDb, StorePath};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = RealtimeDb::new();
//!
//! let key = db.create_key().await?;
//! let path = StorePath::new().child("users").child(&key);
//! db.set(&path, json!({ "name": "Alice", "updatedAt": 1 })).await?;
//!
//! let query = ChildQuery::children(StorePath::new().child("users"))
//!     .order_by_child("updatedAt")
//!     .limit_to_last(25);
//! let _subscription = db.subscribe(query).await?;
//! # Ok(())
//! # }
//! ```

mod database;
mod error;
mod events;
mod path;
mod push_id;
mod query;
mod tree;

// Vertical slices
pub mod users;

pub use database::{RealtimeDb, Subscription};
pub use error::StoreError;
pub use events::ChildEvent;
pub use path::StorePath;
pub use query::ChildQuery;
