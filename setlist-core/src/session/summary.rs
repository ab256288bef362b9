//! Workout completion and summary rendering.

use serde::Serialize;

use crate::session::{MessageId, Session};

pub const SUMMARY_HEADER: &str = "Workout Summary:";

/// Outcome of answering the completion prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Completion {
    /// The session is closed; `delete` lists every message to clean up.
    Finished {
        delete: Vec<MessageId>,
        summary: String,
    },
    /// The user declined; the session is untouched.
    Resumed,
}

impl Session {
    /// One line per log entry, in the order they were recorded.
    pub fn render_summary(&self) -> String {
        self.log
            .iter()
            .map(|record| record.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn into_completion(self) -> Completion {
        let summary = self.render_summary();
        Completion::Finished {
            delete: self.pending_message_ids,
            summary,
        }
    }
}

pub fn summary_message(summary: &str) -> String {
    format!("{}\n{}", SUMMARY_HEADER, summary)
}
