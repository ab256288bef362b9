use serde::Serialize;

use crate::session::SetAction;

pub const COMPLETION_TEXT: &str = "Workout complete. Mark it as finished?";
pub const CONFIRM_YES: &str = "Yes";
pub const CONFIRM_NO: &str = "No";

/// What the engine wants shown next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Prompt {
    Exercise {
        exercise: String,
        set_number: u32,
        target_sets: u32,
    },
    ConfirmCompletion,
}

impl Prompt {
    pub fn text(&self) -> String {
        match self {
            Prompt::Exercise {
                exercise,
                set_number,
                target_sets,
            } => format!("{} – Set {}/{}", exercise, set_number, target_sets),
            Prompt::ConfirmCompletion => COMPLETION_TEXT.to_string(),
        }
    }

    pub fn choices(&self) -> Vec<&'static str> {
        match self {
            Prompt::Exercise { .. } => SetAction::ALL.iter().map(SetAction::label).collect(),
            Prompt::ConfirmCompletion => vec![CONFIRM_YES, CONFIRM_NO],
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, Prompt::ConfirmCompletion)
    }
}
