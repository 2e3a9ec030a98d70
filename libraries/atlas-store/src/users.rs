//! User gateway: CRUD over the `users/` namespace.
//!
//! Thin vertical slice owning the paths and (de)serialization for user
//! records. No transactional guarantees beyond the store's own: last
//! write wins on concurrent `set`.

use crate::database::RealtimeDb;
use crate::error::StoreError;
use crate::path::StorePath;
use atlas_core::types::UserRecord;

type Result<T> = std::result::Result<T, StoreError>;

/// Top-level namespace all user records live under
pub const USERS_PATH: &str = "users";

/// Path of the users namespace
pub fn users_root() -> StorePath {
    StorePath::new().child(USERS_PATH)
}

fn user_path(id: &str) -> StorePath {
    users_root().child(id)
}

/// Request a fresh record key from the store.
///
/// Keys are store-assigned and increasing; callers never compute them.
pub async fn create_key(db: &RealtimeDb) -> Result<String> {
    db.create_key().await
}

/// Fetch one record by id
pub async fn get(db: &RealtimeDb, id: &str) -> Result<Option<UserRecord>> {
    match db.get(&user_path(id)).await {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Persist a record under its own id, overwriting any previous value
pub async fn set(db: &RealtimeDb, record: &UserRecord) -> Result<()> {
    let value = serde_json::to_value(record)?;
    db.set(&user_path(record.id.as_str()), value).await
}

/// Hard-delete a record; deleting an absent id is a no-op
pub async fn remove(db: &RealtimeDb, id: &str) -> Result<()> {
    db.remove(&user_path(id)).await
}

/// Whether any data is stored for this id
pub async fn exists(db: &RealtimeDb, id: &str) -> Result<bool> {
    Ok(db.exists(&user_path(id)).await)
}
