//! HTTP REST API routes

mod account_routes;
mod error;
mod game_routes;
mod leaderboard_routes;

use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::domain::value_objects::{CreatureId, SessionId};
use crate::infrastructure::state::AppState;

use error::ApiError;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Catalog and leaderboard
        .route("/api/catalog", get(leaderboard_routes::get_catalog))
        .route("/api/leaderboard", get(leaderboard_routes::get_leaderboard))
        // Account routes
        .route("/api/accounts/register", post(account_routes::register))
        .route("/api/accounts/login", post(account_routes::login))
        // Session routes
        .route("/api/sessions/{id}", get(account_routes::get_account))
        .route("/api/sessions/{id}/logout", post(account_routes::logout))
        .route(
            "/api/sessions/{id}/chests/{chest_id}/open",
            post(game_routes::open_chest),
        )
        .route(
            "/api/sessions/{id}/creatures/{creature_id}/select",
            post(game_routes::toggle_select),
        )
        .route(
            "/api/sessions/{id}/creatures/{creature_id}/sell",
            post(game_routes::sell),
        )
        .route(
            "/api/sessions/{id}/selection",
            delete(game_routes::clear_selection),
        )
        .route("/api/sessions/{id}/breed", post(game_routes::breed))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::parse(raw).ok_or_else(|| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))
}

fn parse_creature_id(raw: &str) -> Result<CreatureId, ApiError> {
    CreatureId::parse(raw).ok_or_else(|| (StatusCode::BAD_REQUEST, "Invalid creature ID".to_string()))
}
