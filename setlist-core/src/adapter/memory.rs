use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::debug;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::adapter::{ChatTransport, Choice};
use crate::session::{ChatId, MessageId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub chat: ChatId,
    pub text: String,
    pub choices: Vec<Choice>,
    pub edited: bool,
}

impl ChatMessage {
    pub fn choice(&self, label: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.label == label)
    }
}

#[derive(Debug, Default)]
struct MemoryChat {
    next_id: i64,
    messages: Vec<ChatMessage>,
    deleted: Vec<MessageId>,
    undeletable: HashSet<MessageId>,
}

/// A chat that lives in process memory. Used by the terminal front-end and
/// by tests; clones share the same history.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    chat: Arc<Mutex<MemoryChat>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages that are still visible, oldest first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.chat.lock().await.messages.clone()
    }

    pub async fn message(&self, id: MessageId) -> Option<ChatMessage> {
        self.chat
            .lock()
            .await
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
    }

    /// Newest visible message in `chat` that still has buttons.
    pub async fn latest_with_choices(&self, chat: ChatId) -> Option<ChatMessage> {
        self.chat
            .lock()
            .await
            .messages
            .iter()
            .rev()
            .find(|m| m.chat == chat && !m.choices.is_empty())
            .cloned()
    }

    pub async fn deleted(&self) -> Vec<MessageId> {
        self.chat.lock().await.deleted.clone()
    }

    /// Make future deletes of these messages fail, as a real network might.
    pub async fn fail_deletes_for(&self, ids: impl IntoIterator<Item = MessageId>) {
        self.chat.lock().await.undeletable.extend(ids);
    }
}

#[async_trait]
impl ChatTransport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    async fn send_message(&self, chat: ChatId, text: &str, choices: &[Choice]) -> Result<MessageId> {
        let mut state = self.chat.lock().await;
        state.next_id += 1;
        let id = MessageId(state.next_id);
        debug!("MemoryTransport::send_message chat={} id={}", chat, id);
        state.messages.push(ChatMessage {
            id,
            chat,
            text: text.to_string(),
            choices: choices.to_vec(),
            edited: false,
        });
        Ok(id)
    }

    async fn delete_message(&self, chat: ChatId, id: MessageId) -> Result<()> {
        let mut state = self.chat.lock().await;
        if state.undeletable.contains(&id) {
            return Err(anyhow!("message {} can't be deleted", id));
        }
        let position = state
            .messages
            .iter()
            .position(|m| m.id == id && m.chat == chat)
            .ok_or_else(|| anyhow!("message {} to delete not found", id))?;
        state.messages.remove(position);
        state.deleted.push(id);
        Ok(())
    }

    async fn edit_message(&self, chat: ChatId, id: MessageId, text: &str) -> Result<()> {
        let mut state = self.chat.lock().await;
        let message = state
            .messages
            .iter_mut()
            .find(|m| m.id == id && m.chat == chat)
            .ok_or_else(|| anyhow!("message {} to edit not found", id))?;
        message.text = text.to_string();
        message.choices.clear();
        message.edited = true;
        Ok(())
    }
}
