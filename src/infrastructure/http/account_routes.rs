use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use super::error::{account_error, game_error, session_error, ApiError};
use super::parse_session_id;
use crate::application::dto::{AccountViewDto, CredentialsRequestDto, SessionResponseDto};
use crate::domain::aggregates::PlayerAccount;
use crate::infrastructure::session::acquire;
use crate::infrastructure::state::AppState;

/// Create an account and log straight into it
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequestDto>,
) -> Result<Json<SessionResponseDto>, ApiError> {
    let account = state
        .account_service
        .register(&req.username, &req.password)
        .await
        .map_err(account_error)?;
    Ok(Json(open_session(&state, account).await))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequestDto>,
) -> Result<Json<SessionResponseDto>, ApiError> {
    let account = state
        .account_service
        .login(&req.username, &req.password)
        .await
        .map_err(account_error)?;
    Ok(Json(open_session(&state, account).await))
}

async fn open_session(state: &AppState, account: PlayerAccount) -> SessionResponseDto {
    let (session_id, handle) = state.sessions.write().await.create_session(account);
    // A rejoined session may have a flow in flight; wait for it to settle
    let account = handle.lock().await;
    SessionResponseDto::new(session_id, &account)
}

/// End a session; the account's data stays in the store
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let handle = state
        .sessions
        .read()
        .await
        .account(session_id)
        .map_err(session_error)?;
    let account = acquire(handle).map_err(game_error)?;

    state
        .sessions
        .write()
        .await
        .end_session(session_id)
        .map_err(session_error)?;
    state.account_service.logout(&account);

    Ok(Json(serde_json::json!({ "logged_out": true })))
}

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AccountViewDto>, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let handle = state
        .sessions
        .read()
        .await
        .account(session_id)
        .map_err(session_error)?;
    let account = handle.lock().await;
    Ok(Json(AccountViewDto::from(&*account)))
}
