/// Domain types for Atlas Directory entities
pub mod ids;
pub mod user;

pub use ids::UserId;
pub use user::{CreateUser, UpdateUser, UserRecord, NAME_MAX_LEN, ZIP_MAX_LEN, ZIP_MIN_LEN};
