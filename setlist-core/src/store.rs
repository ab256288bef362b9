//! Process-wide map of active sessions, one per user.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use tokio::sync::Mutex;

use crate::errors::SessionError;
use crate::session::{Session, UserId};

/// Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<UserId, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the user's session.
    pub async fn get(&self, user: UserId) -> Option<Session> {
        self.sessions.lock().await.get(&user).cloned()
    }

    /// Store `session`, returning whatever it replaced.
    pub async fn put(&self, user: UserId, session: Session) -> Option<Session> {
        debug!("SessionStore::put user={}", user);
        self.sessions.lock().await.insert(user, session)
    }

    /// Idempotent; returns the removed session if there was one.
    pub async fn remove(&self, user: UserId) -> Option<Session> {
        debug!("SessionStore::remove user={}", user);
        self.sessions.lock().await.remove(&user)
    }

    /// Run `f` against the user's session while holding the store lock, so
    /// two events for the same user cannot interleave their updates.
    pub async fn with_session<R>(
        &self,
        user: UserId,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Result<R, SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&user)
            .ok_or(SessionError::NoActiveSession(user))?;
        Ok(f(session))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DayCode;

    #[tokio::test]
    async fn put_get_remove() {
        let store = SessionStore::new();
        let user = UserId(42);
        assert!(store.get(user).await.is_none());

        let first = Session::new(DayCode::Day1.template(), None);
        assert!(store.put(user, first).await.is_none());
        assert_eq!(store.get(user).await.map(|s| s.day()), Some(DayCode::Day1));

        let second = Session::new(DayCode::Day2.template(), None);
        let replaced = store.put(user, second).await;
        assert_eq!(replaced.map(|s| s.day()), Some(DayCode::Day1));
        assert_eq!(store.get(user).await.map(|s| s.day()), Some(DayCode::Day2));

        assert!(store.remove(user).await.is_some());
        assert!(store.remove(user).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn with_session_requires_a_session() {
        let store = SessionStore::new();
        let err = store.with_session(UserId(1), |s| s.cursor()).await;
        assert_eq!(err, Err(SessionError::NoActiveSession(UserId(1))));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = SessionStore::new();
        let other = store.clone();
        store
            .put(UserId(5), Session::new(DayCode::Day5.template(), None))
            .await;
        assert_eq!(other.len().await, 1);
        other
            .with_session(UserId(5), |s| s.advance())
            .await
            .unwrap();
        assert_eq!(store.get(UserId(5)).await.map(|s| s.cursor()), Some(0));
    }
}
