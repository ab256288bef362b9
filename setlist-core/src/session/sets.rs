use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::SessionError;

/// A button press on an exercise prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SetAction {
    IncrementRep,
    IncrementLoad,
    SetDone,
    Skip,
    Defer,
}

impl SetAction {
    pub const ALL: [SetAction; 5] = [
        SetAction::IncrementRep,
        SetAction::IncrementLoad,
        SetAction::SetDone,
        SetAction::Skip,
        SetAction::Defer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SetAction::IncrementRep => "+1 Rep",
            SetAction::IncrementLoad => "+2.5kg",
            SetAction::SetDone => "Done",
            SetAction::Skip => "Skip",
            SetAction::Defer => "Come Back",
        }
    }

    /// The log entry kind for actions that complete a set.
    pub fn completed_set(&self) -> Option<LoggedAction> {
        match self {
            SetAction::IncrementRep => Some(LoggedAction::IncrementRep),
            SetAction::IncrementLoad => Some(LoggedAction::IncrementLoad),
            SetAction::SetDone => Some(LoggedAction::SetDone),
            SetAction::Skip | SetAction::Defer => None,
        }
    }
}

impl fmt::Display for SetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SetAction {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SetAction::ALL
            .into_iter()
            .find(|a| a.label() == s)
            .ok_or_else(|| SessionError::invalid_action(s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LoggedAction {
    IncrementRep,
    IncrementLoad,
    SetDone,
    Skipped,
}

impl LoggedAction {
    pub fn label(&self) -> &'static str {
        match self {
            LoggedAction::IncrementRep => "+1 Rep",
            LoggedAction::IncrementLoad => "+2.5kg",
            LoggedAction::SetDone => "Done",
            LoggedAction::Skipped => "Skipped",
        }
    }

    pub fn completes_set(&self) -> bool {
        !matches!(self, LoggedAction::Skipped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetRecord {
    pub exercise: String,
    pub action: LoggedAction,
}

impl SetRecord {
    pub fn new(exercise: impl Into<String>, action: LoggedAction) -> Self {
        Self {
            exercise: exercise.into(),
            action,
        }
    }

    /// The exercise stays in `exercise`; only `Display` puts the marker first.
    pub fn skipped(exercise: impl Into<String>) -> Self {
        Self::new(exercise, LoggedAction::Skipped)
    }

    pub fn counts_toward(&self, exercise: &str) -> bool {
        self.action.completes_set() && self.exercise == exercise
    }
}

// Skips render marker-first ("Skipped – Pec Deck"); summaries depend on it.
impl fmt::Display for SetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            LoggedAction::Skipped => write!(f, "Skipped – {}", self.exercise),
            action => write!(f, "{} – {}", self.exercise, action.label()),
        }
    }
}
