//! In-memory session store.
//!
//! Process-local map, sufficient for a single-instance deployment. A
//! shared-store implementation can replace it behind the same port for
//! multi-instance deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::intake::IntakeSession;
use crate::ports::{SessionStore, SessionStoreError};

/// RwLock'd map of sessions keyed by id.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, IntakeSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions (test helper).
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &SessionId) -> Result<Option<IntakeSession>, SessionStoreError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn put(&self, session: IntakeSession) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .insert(session.id().clone(), session);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intake::AnswerValue;

    #[tokio::test]
    async fn get_returns_none_for_unknown_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("missing").unwrap();
        assert!(store.get(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("s-1").unwrap();
        let mut session = IntakeSession::new(id.clone());
        session.set_answer("urgency", AnswerValue::Number(7.0));

        store.put(session).await.unwrap();

        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.answer("urgency"), Some(&AnswerValue::Number(7.0)));
    }

    #[tokio::test]
    async fn put_replaces_previous_state() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("s-2").unwrap();

        let mut first = IntakeSession::new(id.clone());
        first.set_answer("urgency", AnswerValue::Number(2.0));
        store.put(first).await.unwrap();

        let mut second = IntakeSession::new(id.clone());
        second.set_answer("urgency", AnswerValue::Number(9.0));
        store.put(second).await.unwrap();

        let loaded = store.get(&id).await.unwrap().unwrap();
        assert_eq!(loaded.answer("urgency"), Some(&AnswerValue::Number(9.0)));
        assert_eq!(store.len().await, 1);
    }
}
