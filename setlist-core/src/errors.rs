use thiserror::Error as ThisError;

use crate::session::UserId;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum SessionError {
    #[error("unknown workout day: {0}")]
    UnknownDay(String),
    #[error("no active session for user {0}")]
    NoActiveSession(UserId),
    #[error("invalid action: {0}")]
    InvalidAction(String),
}

impl SessionError {
    pub fn invalid_action<D: std::fmt::Display>(d: D) -> Self {
        SessionError::InvalidAction(d.to_string())
    }
}
