//! Atlas Directory Live Client
//!
//! Client-side view of the user directory: a realtime, paginated feed over
//! the store plus a typed HTTP client for mutations.
//!
//! # Features
//!
//! - **Realtime feed**: live, deduplicated, `updatedAt`-descending view of
//!   the directory with incremental "load older" pagination
//! - **Mutations**: create/update/delete users through the REST API
//!
//! # Example
//!
//! ```ignore
//! use atlas_live::{DirectoryClient, UserFeed};
//! use atlas_core::types::CreateUser;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Mutations go through the HTTP API
//!     let client = DirectoryClient::new("http://localhost:8080")?;
//!     let created = client
//!         .create_user(&CreateUser {
//!             name: "Alice".to_string(),
//!             zip: "10001".to_string(),
//!         })
//!         .await?;
//!     println!("created {}", created.id);
//!
//!     // Reads come from the realtime store
//!     let mut feed = UserFeed::new(db);
//!     feed.refresh().await?;
//!     for user in feed.users() {
//!         println!("{} ({})", user.name, user.timezone);
//!     }
//!
//!     // Page back through history
//!     while feed.load_older().await? {}
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod feed;

// Re-export main types
pub use client::DirectoryClient;
pub use error::{ClientError, LiveError};
pub use feed::{FeedEvent, UserFeed, PAGE_SIZE};
