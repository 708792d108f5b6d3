//! Persistence queue - Ordered fire-and-forget account saves
//!
//! Game flows commit to the in-memory aggregate first and then enqueue a
//! snapshot here. A single worker drains the queue, so the store sees
//! snapshots in commit order. Store failures are logged and never surface
//! to the player.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::application::ports::outbound::AccountStorePort;
use crate::domain::aggregates::AccountSnapshot;

enum PersistCommand {
    Save(AccountSnapshot),
    Flush(oneshot::Sender<()>),
}

/// Handle for enqueueing account snapshots
#[derive(Clone)]
pub struct PersistenceQueue {
    sender: mpsc::UnboundedSender<PersistCommand>,
}

impl PersistenceQueue {
    /// Start the worker on the current tokio runtime
    pub fn spawn(store: Arc<dyn AccountStorePort>) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(store, receiver));
        (Self { sender }, worker)
    }

    pub fn enqueue(&self, snapshot: AccountSnapshot) {
        let username = snapshot.username.clone();
        if self.sender.send(PersistCommand::Save(snapshot)).is_err() {
            tracing::error!(%username, "Persistence worker stopped, snapshot dropped");
        }
    }

    /// Wait until everything enqueued so far has been handed to the store
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(PersistCommand::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }
}

async fn run_worker(
    store: Arc<dyn AccountStorePort>,
    mut receiver: mpsc::UnboundedReceiver<PersistCommand>,
) {
    tracing::info!("Starting account persistence worker");
    while let Some(command) = receiver.recv().await {
        match command {
            PersistCommand::Save(snapshot) => {
                if let Err(e) = store.persist(&snapshot).await {
                    tracing::error!(username = %snapshot.username, error = %e, "Failed to persist account");
                } else {
                    tracing::debug!(
                        username = %snapshot.username,
                        currency = snapshot.currency,
                        experience = snapshot.experience,
                        "Account persisted"
                    );
                }
            }
            PersistCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::info!("Account persistence worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryAccountRepository;

    #[tokio::test]
    async fn test_snapshots_applied_in_commit_order() {
        let store = Arc::new(InMemoryAccountRepository::new(500));
        store.create("ember", "pw").await.unwrap();
        let (queue, _worker) = PersistenceQueue::spawn(store.clone());

        for currency in [400, 300, 250] {
            let mut snapshot = AccountSnapshot::fresh("ember", currency);
            snapshot.experience = 1000 - currency;
            queue.enqueue(snapshot);
        }
        queue.flush().await;

        let loaded = store.load("ember", "pw").await.unwrap();
        assert_eq!(loaded.currency, 250);
        assert_eq!(loaded.experience, 750);
    }

    #[tokio::test]
    async fn test_store_failure_does_not_stop_worker() {
        let store = Arc::new(InMemoryAccountRepository::new(500));
        store.create("ember", "pw").await.unwrap();
        let (queue, _worker) = PersistenceQueue::spawn(store.clone());

        queue.enqueue(AccountSnapshot::fresh("ghost", 1));
        queue.enqueue(AccountSnapshot::fresh("ember", 42));
        queue.flush().await;

        assert_eq!(store.load("ember", "pw").await.unwrap().currency, 42);
    }
}
