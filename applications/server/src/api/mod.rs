/// API route modules
pub mod health;
pub mod users;

use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

/// All API routes, without middleware layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/:id", get(users::get_user))
        .route("/users/:id", patch(users::update_user))
        .route("/users/:id", delete(users::delete_user))
        .route("/helloWorld", get(health::hello_world))
        .route("/health", get(health::health))
        .with_state(state)
}
