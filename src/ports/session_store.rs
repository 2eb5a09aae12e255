//! Session store port - intake session persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;

/// Errors from the session store backend.
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    /// Store backend is unreachable or failed.
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting intake sessions.
///
/// May be process-local memory (single-instance deployments) or a shared
/// store; the domain is indifferent as long as get/put round-trip within
/// the request. Expiry of stale sessions is the store's concern.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session by id.
    async fn get(&self, id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError>;

    /// Saves a session, replacing any previous state.
    async fn put(&self, session: IntakeSession) -> Result<(), SessionStoreError>;
}
