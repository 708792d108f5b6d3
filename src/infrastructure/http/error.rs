//! Mapping of application errors onto HTTP status codes

use axum::http::StatusCode;

use crate::application::ports::outbound::AccountStoreError;
use crate::application::services::AccountError;
use crate::domain::errors::GameError;
use crate::infrastructure::session::SessionError;

pub type ApiError = (StatusCode, String);

pub fn game_error(e: GameError) -> ApiError {
    let status = match &e {
        GameError::InsufficientFunds { .. } => StatusCode::PAYMENT_REQUIRED,
        GameError::InvalidSelection(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GameError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
        GameError::Busy => StatusCode::CONFLICT,
        GameError::CreatureNotFound(_) | GameError::UnknownChest(_) => StatusCode::NOT_FOUND,
    };
    (status, e.to_string())
}

pub fn store_error(e: AccountStoreError) -> ApiError {
    let status = match &e {
        AccountStoreError::NotFound => StatusCode::NOT_FOUND,
        AccountStoreError::BadCredentials => StatusCode::UNAUTHORIZED,
        AccountStoreError::AlreadyExists => StatusCode::CONFLICT,
        AccountStoreError::Database(_) | AccountStoreError::Serialization(_) => {
            tracing::error!("Account store failure: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}

pub fn account_error(e: AccountError) -> ApiError {
    match e {
        AccountError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        AccountError::Store(e) => store_error(e),
    }
}

pub fn session_error(e: SessionError) -> ApiError {
    (StatusCode::NOT_FOUND, e.to_string())
}
