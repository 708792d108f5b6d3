use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tokio::sync::OwnedMutexGuard;

use super::error::{game_error, session_error, ApiError};
use super::{parse_creature_id, parse_session_id};
use crate::application::dto::{
    AccountViewDto, AcquisitionResponseDto, CreatureDto, SaleResponseDto,
};
use crate::domain::aggregates::PlayerAccount;
use crate::domain::entities::Creature;
use crate::domain::errors::GameError;
use crate::infrastructure::session::acquire;
use crate::infrastructure::state::AppState;

/// Take exclusive use of the session's account for one flow
async fn lock_account(
    state: &AppState,
    session_id: &str,
) -> Result<OwnedMutexGuard<PlayerAccount>, ApiError> {
    let session_id = parse_session_id(session_id)?;
    let handle = state
        .sessions
        .read()
        .await
        .account(session_id)
        .map_err(session_error)?;
    acquire(handle).map_err(game_error)
}

/// Run a generation flow on its own task.
///
/// The flow keeps the account guard and runs to its commit even if the
/// request future is dropped, e.g. when the client disconnects mid-reveal.
async fn run_detached<F>(flow: F) -> Result<AcquisitionResponseDto, ApiError>
where
    F: Future<Output = Result<AcquisitionResponseDto, GameError>> + Send + 'static,
{
    tokio::spawn(flow)
        .await
        .map_err(|e| {
            tracing::error!("Generation flow task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Generation flow aborted".to_string())
        })?
        .map_err(game_error)
}

fn acquisition(creature: &Creature, account: &PlayerAccount) -> AcquisitionResponseDto {
    AcquisitionResponseDto {
        creature: CreatureDto::from(creature),
        account: AccountViewDto::from(account),
    }
}

pub async fn open_chest(
    State(state): State<Arc<AppState>>,
    Path((session_id, chest_id)): Path<(String, String)>,
) -> Result<Json<AcquisitionResponseDto>, ApiError> {
    let mut account = lock_account(&state, &session_id).await?;
    let flow_state = Arc::clone(&state);
    run_detached(async move {
        let creature = flow_state
            .game_service
            .open_chest(&mut account, &chest_id)
            .await?;
        Ok(acquisition(&creature, &account))
    })
    .await
    .map(Json)
}

pub async fn toggle_select(
    State(state): State<Arc<AppState>>,
    Path((session_id, creature_id)): Path<(String, String)>,
) -> Result<Json<AccountViewDto>, ApiError> {
    let creature_id = parse_creature_id(&creature_id)?;
    let mut account = lock_account(&state, &session_id).await?;
    state
        .game_service
        .toggle_select(&mut account, creature_id)
        .map_err(game_error)?;
    Ok(Json(AccountViewDto::from(&*account)))
}

pub async fn clear_selection(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AccountViewDto>, ApiError> {
    let mut account = lock_account(&state, &session_id).await?;
    state.game_service.clear_selection(&mut account);
    Ok(Json(AccountViewDto::from(&*account)))
}

pub async fn breed(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<AcquisitionResponseDto>, ApiError> {
    let mut account = lock_account(&state, &session_id).await?;
    let flow_state = Arc::clone(&state);
    run_detached(async move {
        let offspring = flow_state.game_service.breed(&mut account).await?;
        Ok(acquisition(&offspring, &account))
    })
    .await
    .map(Json)
}

pub async fn sell(
    State(state): State<Arc<AppState>>,
    Path((session_id, creature_id)): Path<(String, String)>,
) -> Result<Json<SaleResponseDto>, ApiError> {
    let creature_id = parse_creature_id(&creature_id)?;
    let mut account = lock_account(&state, &session_id).await?;
    let credited = state
        .game_service
        .sell(&mut account, creature_id)
        .map_err(game_error)?;

    Ok(Json(SaleResponseDto {
        credited,
        account: AccountViewDto::from(&*account),
    }))
}
