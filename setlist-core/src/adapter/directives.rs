use crate::adapter::Choice;
use crate::session::MessageId;

/// What the adapter asks the transport to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    ShowPrompt { text: String, choices: Vec<Choice> },
    ShowSummary { text: String },
    DeleteMessages { ids: Vec<MessageId> },
    EditMessage { id: MessageId, text: String },
}

/// Result of a best-effort bulk delete. Failures are collected, never raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub deleted: Vec<MessageId>,
    pub failed: Vec<(MessageId, String)>,
}

impl DeletionReport {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
