//! Atlas Directory Core
//!
//! Shared domain types, validation, and error handling for the Atlas
//! user-directory service.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `UserRecord`, `UserId`, request payloads
//! - **Validation**: field limits shared by server and client
//! - **Error Handling**: unified `DirectoryError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use atlas_core::types::{CreateUser, UserId};
//!
//! let request = CreateUser {
//!     name: "Alice".to_string(),
//!     zip: "10001".to_string(),
//! };
//! assert!(request.validate().is_ok());
//!
//! let id = UserId::new("-OaBcDeFgHiJkLmNoPqR");
//! assert_eq!(id.as_str(), "-OaBcDeFgHiJkLmNoPqR");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{DirectoryError, Result};
pub use types::{CreateUser, UpdateUser, UserId, UserRecord};
