//! Session management for logged-in players
//!
//! A session binds a [`SessionId`] handed to the client to the live
//! [`PlayerAccount`] of one user. A user has at most one live session; a
//! second login attaches to the existing one so both views share a single
//! aggregate.
//!
//! Each account sits behind its own async mutex. Game flows take it with
//! `try_lock`, so a request arriving while another flow on the same account
//! is in flight is rejected instead of queued.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::aggregates::PlayerAccount;
use crate::domain::errors::GameError;
use crate::domain::value_objects::SessionId;

pub type AccountHandle = Arc<Mutex<PlayerAccount>>;

/// A single logged-in player
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub id: SessionId,
    pub username: String,
    pub started_at: DateTime<Utc>,
    account: AccountHandle,
}

impl PlayerSession {
    pub fn account(&self) -> AccountHandle {
        Arc::clone(&self.account)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Manages active player sessions
#[derive(Debug, Default)]
pub struct SessionManager {
    /// Active sessions by session ID
    sessions: HashMap<SessionId, PlayerSession>,
    /// Maps usernames to their live session
    user_sessions: HashMap<String, SessionId>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for a freshly loaded account.
    ///
    /// If the user already has a live session that session is returned and
    /// the freshly loaded account is discarded.
    pub fn create_session(&mut self, account: PlayerAccount) -> (SessionId, AccountHandle) {
        let username = account.username().to_string();
        if let Some(existing) = self
            .user_sessions
            .get(&username)
            .and_then(|id| self.sessions.get(id))
        {
            tracing::info!("User {} rejoined session {}", username, existing.id);
            return (existing.id, existing.account());
        }

        let session_id = SessionId::new();
        let handle = Arc::new(Mutex::new(account));
        let session = PlayerSession {
            id: session_id,
            username: username.clone(),
            started_at: Utc::now(),
            account: Arc::clone(&handle),
        };
        self.user_sessions.insert(username.clone(), session_id);
        self.sessions.insert(session_id, session);

        tracing::info!(
            "Created session {} for user {} ({} active)",
            session_id,
            username,
            self.sessions.len()
        );
        (session_id, handle)
    }

    pub fn get_session(&self, session_id: SessionId) -> Result<&PlayerSession, SessionError> {
        self.sessions
            .get(&session_id)
            .ok_or(SessionError::NotFound(session_id))
    }

    pub fn account(&self, session_id: SessionId) -> Result<AccountHandle, SessionError> {
        self.get_session(session_id).map(PlayerSession::account)
    }

    /// Drop a session; the caller decides what to do with the account
    pub fn end_session(&mut self, session_id: SessionId) -> Result<PlayerSession, SessionError> {
        let session = self
            .sessions
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        self.user_sessions.remove(&session.username);
        tracing::info!(
            "Ended session {} for user {} after {}s",
            session_id,
            session.username,
            (Utc::now() - session.started_at).num_seconds()
        );
        Ok(session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Take exclusive use of an account, failing if a flow already holds it
pub fn acquire(account: AccountHandle) -> Result<OwnedMutexGuard<PlayerAccount>, GameError> {
    account.try_lock_owned().map_err(|_| GameError::Busy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::AccountSnapshot;

    fn account(username: &str) -> PlayerAccount {
        PlayerAccount::from_snapshot(AccountSnapshot::fresh(username, 500))
    }

    #[test]
    fn test_create_and_end_session() {
        let mut manager = SessionManager::new();
        let (id, _) = manager.create_session(account("ember"));

        assert_eq!(manager.get_session(id).unwrap().username, "ember");
        assert_eq!(manager.session_count(), 1);

        let ended = manager.end_session(id).unwrap();
        assert_eq!(ended.username, "ember");
        assert!(matches!(manager.account(id), Err(SessionError::NotFound(_))));
        assert!(manager.end_session(id).is_err());
    }

    #[tokio::test]
    async fn test_second_login_shares_account() {
        let mut manager = SessionManager::new();
        let (first, handle) = manager.create_session(account("ember"));
        handle.lock().await.charge(100).unwrap();

        let (second, rejoined) = manager.create_session(account("ember"));
        assert_eq!(first, second);
        assert_eq!(manager.session_count(), 1);
        assert_eq!(rejoined.lock().await.ledger().currency(), 400);
    }

    #[tokio::test]
    async fn test_acquire_rejects_while_held() {
        let mut manager = SessionManager::new();
        let (id, _) = manager.create_session(account("ember"));

        let guard = acquire(manager.account(id).unwrap()).unwrap();
        assert_eq!(acquire(manager.account(id).unwrap()).unwrap_err(), GameError::Busy);

        drop(guard);
        assert!(acquire(manager.account(id).unwrap()).is_ok());
    }
}
