/// User record and request payloads
use super::ids::UserId;
use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};

/// Maximum accepted length of a user name, in characters
pub const NAME_MAX_LEN: usize = 200;

/// Minimum accepted length of a ZIP code, in characters
pub const ZIP_MIN_LEN: usize = 3;

/// Maximum accepted length of a ZIP code, in characters
pub const ZIP_MAX_LEN: usize = 20;

/// A directory entry: caller-supplied identity plus derived geo data.
///
/// Serialized camelCase; this is both the wire format of the HTTP API and
/// the value stored under `users/{id}`. The key is stored redundantly as
/// the `id` field inside the value and the two must stay consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Store-assigned identifier, immutable after creation
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Postal code the geo fields were derived from
    pub zip: String,

    /// Derived latitude
    pub lat: f64,

    /// Derived longitude
    pub lon: f64,

    /// Derived IANA timezone (e.g. "America/New_York")
    pub timezone: String,

    /// Derived UTC offset in seconds
    pub tz_offset_sec: i64,

    /// Creation timestamp, epoch milliseconds, set once
    pub created_at: i64,

    /// Last-mutation timestamp, epoch milliseconds; the sort and
    /// pagination key
    pub updated_at: i64,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name, 1 to 200 characters
    pub name: String,
    /// Postal code, 3 to 20 characters
    pub zip: String,
}

impl CreateUser {
    /// Check field limits, rejecting the request before any upstream call
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_zip(&self.zip)
    }
}

/// Body of `PATCH /users/:id`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New display name, if changing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New postal code, if changing; triggers geo re-resolution when it
    /// differs from the stored value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl UpdateUser {
    /// Check field limits on whichever fields are present
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(zip) = &self.zip {
            validate_zip(zip)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 {
        return Err(DirectoryError::validation("name must not be empty"));
    }
    if len > NAME_MAX_LEN {
        return Err(DirectoryError::validation(format!(
            "name must be at most {} characters",
            NAME_MAX_LEN
        )));
    }
    Ok(())
}

fn validate_zip(zip: &str) -> Result<()> {
    let len = zip.chars().count();
    if len < ZIP_MIN_LEN || len > ZIP_MAX_LEN {
        return Err(DirectoryError::validation(format!(
            "zip must be between {} and {} characters",
            ZIP_MIN_LEN, ZIP_MAX_LEN
        )));
    }
    Ok(())
}
