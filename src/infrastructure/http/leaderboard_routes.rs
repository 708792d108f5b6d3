use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use super::error::{store_error, ApiError};
use crate::application::dto::CatalogDto;
use crate::application::services::LeaderboardEntry;
use crate::domain::value_objects::SessionId;
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    /// Marks the caller's own row when it belongs to a live session
    #[serde(default)]
    pub session: Option<String>,
}

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let current = match query.session.as_deref().and_then(SessionId::parse) {
        Some(session_id) => state
            .sessions
            .read()
            .await
            .get_session(session_id)
            .ok()
            .map(|session| session.username.clone()),
        None => None,
    };

    state
        .leaderboard_service
        .entries(current.as_deref())
        .await
        .map(Json)
        .map_err(store_error)
}

/// Chest offers, drop rates and element tiers
pub async fn get_catalog() -> Json<CatalogDto> {
    Json(CatalogDto::build())
}
