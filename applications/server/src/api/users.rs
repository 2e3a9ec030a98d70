/// Users API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use atlas_core::types::{CreateUser, UpdateUser, UserId, UserRecord};
use atlas_store::users;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

/// POST /users
///
/// Validate, resolve geo data for the ZIP, then persist under a fresh
/// store-assigned key. `created_at == updated_at` on the returned record.
pub async fn create_user(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<UserRecord>)> {
    let Json(request) = payload.map_err(|err| ServerError::BadRequest(err.body_text()))?;
    request.validate()?;

    let geo = app_state.geo.resolve(&request.zip, None).await?;

    let id = users::create_key(&app_state.db).await?;
    let now = Utc::now().timestamp_millis();
    let user = UserRecord {
        id: UserId::new(id),
        name: request.name,
        zip: request.zip,
        lat: geo.lat,
        lon: geo.lon,
        timezone: geo.timezone,
        tz_offset_sec: geo.tz_offset_sec,
        created_at: now,
        updated_at: now,
    };
    users::set(&app_state.db, &user).await?;

    tracing::info!(id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<UserRecord>> {
    let user = users::get(&app_state.db, &id)
        .await?
        .ok_or(ServerError::NotFound)?;
    Ok(Json(user))
}

/// PATCH /users/:id
///
/// Merge the supplied fields into the stored record. A changed zip
/// re-resolves the geo fields synchronously; `updated_at` is refreshed on
/// every successful call regardless of what changed.
pub async fn update_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<UserRecord>> {
    let Json(request) = payload.map_err(|err| ServerError::BadRequest(err.body_text()))?;
    request.validate()?;

    let mut user = users::get(&app_state.db, &id)
        .await?
        .ok_or(ServerError::NotFound)?;

    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(zip) = request.zip {
        if zip != user.zip {
            let geo = app_state.geo.resolve(&zip, None).await?;
            user.zip = zip;
            user.lat = geo.lat;
            user.lon = geo.lon;
            user.timezone = geo.timezone;
            user.tz_offset_sec = geo.tz_offset_sec;
        }
    }

    user.updated_at = Utc::now().timestamp_millis();
    users::set(&app_state.db, &user).await?;

    tracing::info!(id = %user.id, "user updated");
    Ok(Json(user))
}

/// DELETE /users/:id
///
/// Hard delete, no tombstone. 204 with an empty body on success.
pub async fn delete_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<StatusCode> {
    if users::get(&app_state.db, &id).await?.is_none() {
        return Err(ServerError::NotFound);
    }
    users::remove(&app_state.db, &id).await?;

    tracing::info!(id = %id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}
