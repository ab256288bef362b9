use log::{debug, info, warn};

use crate::catalog;
use crate::errors::SessionError;
use crate::session::{Completion, MessageId, Prompt, Session, SetAction, UserId};
use crate::store::SessionStore;

/// Drives sessions held in a `SessionStore`, keyed by user.
#[derive(Debug, Clone, Default)]
pub struct WorkoutEngine {
    store: SessionStore,
}

impl WorkoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: SessionStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Begin `day_code` for `user`, replacing any session they already had.
    pub async fn start_session(
        &self,
        user: UserId,
        day_code: &str,
        trigger: Option<MessageId>,
    ) -> Result<Prompt, SessionError> {
        let template = catalog::lookup(day_code)?;
        let mut session = Session::new(template, trigger);
        let prompt = session.advance();

        if let Some(previous) = self.store.put(user, session).await {
            warn!(
                "Replaced in-progress {} session for user {} ({} logged sets discarded)",
                previous.day(),
                user,
                previous.log().len()
            );
        }
        info!("Started {} for user {}", day_code, user);
        Ok(prompt)
    }

    pub async fn apply_set_action(
        &self,
        user: UserId,
        action: SetAction,
    ) -> Result<Prompt, SessionError> {
        debug!("WorkoutEngine::apply_set_action user={} action={}", user, action);
        self.store
            .with_session(user, |session| session.apply(action))
            .await
    }

    /// Answer the completion prompt. Confirming closes the session and hands
    /// back everything needed for cleanup; declining changes nothing.
    pub async fn confirm_completion(
        &self,
        user: UserId,
        confirmed: bool,
    ) -> Result<Completion, SessionError> {
        if !confirmed {
            self.store.with_session(user, |_| ()).await?;
            debug!("User {} declined completion", user);
            return Ok(Completion::Resumed);
        }

        let session = self
            .store
            .remove(user)
            .await
            .ok_or(SessionError::NoActiveSession(user))?;
        info!(
            "User {} finished {} with {} logged entries",
            user,
            session.day(),
            session.log().len()
        );
        Ok(session.into_completion())
    }

    /// The prompt the user should be looking at right now.
    pub async fn resume(&self, user: UserId) -> Result<Prompt, SessionError> {
        self.store.with_session(user, Session::advance).await
    }

    pub async fn record_message(&self, user: UserId, id: MessageId) -> Result<(), SessionError> {
        self.store
            .with_session(user, |session| session.record_message(id))
            .await
    }
}
