use std::fmt;

use crate::catalog::DayCode;
use crate::errors::SessionError;
use crate::session::{CONFIRM_NO, CONFIRM_YES, ChatId, MessageId, SetAction, UserId};

const DAY_PREFIX: &str = "day";
const SET_PREFIX: &str = "set";
const DONE_PREFIX: &str = "done";

/// Decoded button payload. Buttons carry `prefix:value` strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Day(String),
    Set(String),
    Done(bool),
}

impl Callback {
    pub fn parse(data: &str) -> Result<Self, SessionError> {
        let (prefix, value) = data
            .split_once(':')
            .ok_or_else(|| SessionError::invalid_action(data))?;
        match prefix {
            DAY_PREFIX => Ok(Callback::Day(value.to_string())),
            SET_PREFIX => Ok(Callback::Set(value.to_string())),
            DONE_PREFIX => match value {
                CONFIRM_YES => Ok(Callback::Done(true)),
                CONFIRM_NO => Ok(Callback::Done(false)),
                _ => Err(SessionError::invalid_action(data)),
            },
            _ => Err(SessionError::invalid_action(data)),
        }
    }

    pub fn day(day: DayCode) -> Self {
        Callback::Day(day.as_str().to_string())
    }

    pub fn set(action: SetAction) -> Self {
        Callback::Set(action.label().to_string())
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Day(code) => write!(f, "{}:{}", DAY_PREFIX, code),
            Callback::Set(label) => write!(f, "{}:{}", SET_PREFIX, label),
            Callback::Done(true) => write!(f, "{}:{}", DONE_PREFIX, CONFIRM_YES),
            Callback::Done(false) => write!(f, "{}:{}", DONE_PREFIX, CONFIRM_NO),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The `/start_workout` command: show the day menu.
    StartWorkout,
    SelectDay {
        day_code: String,
        message: MessageId,
    },
    SetActionChosen {
        label: String,
        message: MessageId,
    },
    CompletionChoice {
        confirmed: bool,
        message: MessageId,
    },
    /// Re-send whatever prompt the session is currently on.
    Resume,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user: UserId,
    pub chat: ChatId,
    pub kind: EventKind,
}

impl InboundEvent {
    pub fn new(user: UserId, chat: ChatId, kind: EventKind) -> Self {
        Self { user, chat, kind }
    }

    /// Build an event from a pressed button on `message`.
    pub fn from_callback(
        user: UserId,
        chat: ChatId,
        message: MessageId,
        data: &str,
    ) -> Result<Self, SessionError> {
        let kind = match Callback::parse(data)? {
            Callback::Day(day_code) => EventKind::SelectDay { day_code, message },
            Callback::Set(label) => EventKind::SetActionChosen { label, message },
            Callback::Done(confirmed) => EventKind::CompletionChoice { confirmed, message },
        };
        Ok(Self::new(user, chat, kind))
    }

    /// Build an event from a slash command, if it is one we handle.
    pub fn from_command(user: UserId, chat: ChatId, text: &str) -> Option<Self> {
        let command = text.split_whitespace().next()?;
        let command = command.split('@').next().unwrap_or(command);
        let kind = match command {
            "/start_workout" => EventKind::StartWorkout,
            "/resume" => EventKind::Resume,
            _ => return None,
        };
        Some(Self::new(user, chat, kind))
    }
}
