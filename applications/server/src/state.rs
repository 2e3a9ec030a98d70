/// Shared application state
use crate::services::GeoResolver;
use atlas_store::RealtimeDb;
use std::sync::Arc;

/// Application state shared across all handlers.
///
/// Built once at startup; handlers never open their own store handle or
/// resolver.
#[derive(Clone)]
pub struct AppState {
    pub db: RealtimeDb,
    pub geo: Arc<GeoResolver>,
}

impl AppState {
    pub fn new(db: RealtimeDb, geo: Arc<GeoResolver>) -> Self {
        Self { db, geo }
    }
}
