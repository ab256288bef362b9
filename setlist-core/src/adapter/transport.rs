use async_trait::async_trait;
use serde::Serialize;

use crate::session::{ChatId, MessageId};

/// An inline button: what the user sees and what comes back when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
    pub data: String,
}

impl Choice {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// All chat transports implement this trait.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Human-readable transport name for logging.
    fn name(&self) -> &str;

    /// Post a message with optional buttons, returning its handle.
    async fn send_message(
        &self,
        chat: ChatId,
        text: &str,
        choices: &[Choice],
    ) -> anyhow::Result<MessageId>;

    async fn delete_message(&self, chat: ChatId, id: MessageId) -> anyhow::Result<()>;

    /// Replace a message's text and drop its buttons.
    async fn edit_message(&self, chat: ChatId, id: MessageId, text: &str) -> anyhow::Result<()>;
}
