use anyhow::Result;
use log::{debug, info, warn};

use crate::adapter::{Callback, ChatTransport, Choice, DeletionReport, Directive, EventKind, InboundEvent};
use crate::catalog::DayCode;
use crate::errors::SessionError;
use crate::session::{
    CONFIRM_YES, ChatId, Completion, MessageId, Prompt, SetAction, UserId, WorkoutEngine,
    summary_message,
};

pub const DAY_MENU_TEXT: &str = "Choose workout day:";
pub const CONTINUE_TEXT: &str = "Okay. You can continue the workout.";

/// Routes chat events into the engine and renders its answers.
///
/// Engine errors (unknown day, stale buttons, no session) are logged and the
/// event is dropped; only transport failures reach the caller.
pub struct WorkoutBot<T: ChatTransport> {
    engine: WorkoutEngine,
    transport: T,
}

impl<T: ChatTransport> WorkoutBot<T> {
    pub fn new(transport: T) -> Self {
        Self::with_engine(WorkoutEngine::new(), transport)
    }

    pub fn with_engine(engine: WorkoutEngine, transport: T) -> Self {
        info!("WorkoutBot using {} transport", transport.name());
        Self { engine, transport }
    }

    pub fn engine(&self) -> &WorkoutEngine {
        &self.engine
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn handle(&self, event: InboundEvent) -> Result<()> {
        match self.route(&event).await {
            Ok(()) => Ok(()),
            Err(err) => match err.downcast_ref::<SessionError>() {
                Some(session_err) => {
                    warn!(
                        "Ignoring {:?} from user {}: {}",
                        event.kind, event.user, session_err
                    );
                    Ok(())
                }
                None => Err(err.context(format!(
                    "{} transport failed while handling an event for user {}",
                    self.transport.name(),
                    event.user
                ))),
            },
        }
    }

    /// Decode a pressed button and handle it. Unknown payloads are dropped.
    pub async fn handle_callback(
        &self,
        user: UserId,
        chat: ChatId,
        message: MessageId,
        data: &str,
    ) -> Result<()> {
        match InboundEvent::from_callback(user, chat, message, data) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                warn!("Ignoring button {:?} from user {}: {}", data, user, err);
                Ok(())
            }
        }
    }

    async fn route(&self, event: &InboundEvent) -> Result<()> {
        let user = event.user;
        let chat = event.chat;
        match &event.kind {
            EventKind::StartWorkout => {
                self.dispatch(chat, day_menu()).await?;
            }
            EventKind::SelectDay { day_code, message } => {
                let prompt = self
                    .engine
                    .start_session(user, day_code, Some(*message))
                    .await?;
                self.show_prompt(user, chat, &prompt).await?;
            }
            EventKind::SetActionChosen { label, message } => {
                let action: SetAction = label.parse()?;
                self.engine.record_message(user, *message).await?;
                let prompt = self.engine.apply_set_action(user, action).await?;
                self.show_prompt(user, chat, &prompt).await?;
            }
            EventKind::CompletionChoice { confirmed, message } => {
                match self.engine.confirm_completion(user, *confirmed).await? {
                    Completion::Finished { delete, summary } => {
                        self.dispatch(chat, Directive::DeleteMessages { ids: delete })
                            .await?;
                        self.dispatch(
                            chat,
                            Directive::ShowSummary {
                                text: summary_message(&summary),
                            },
                        )
                        .await?;
                    }
                    Completion::Resumed => {
                        self.dispatch(
                            chat,
                            Directive::EditMessage {
                                id: *message,
                                text: CONTINUE_TEXT.to_string(),
                            },
                        )
                        .await?;
                    }
                }
            }
            EventKind::Resume => {
                let prompt = self.engine.resume(user).await?;
                self.show_prompt(user, chat, &prompt).await?;
            }
        }
        Ok(())
    }

    async fn show_prompt(&self, user: UserId, chat: ChatId, prompt: &Prompt) -> Result<()> {
        if let Some(id) = self.dispatch(chat, prompt_directive(prompt)).await? {
            self.engine.record_message(user, id).await?;
        }
        Ok(())
    }

    /// Carry out one directive. Returns the id of any message it posted.
    pub async fn dispatch(&self, chat: ChatId, directive: Directive) -> Result<Option<MessageId>> {
        match directive {
            Directive::ShowPrompt { text, choices } => {
                let id = self.transport.send_message(chat, &text, &choices).await?;
                debug!("Sent prompt {} to chat {}: {}", id, chat, text);
                Ok(Some(id))
            }
            Directive::ShowSummary { text } => {
                let id = self.transport.send_message(chat, &text, &[]).await?;
                Ok(Some(id))
            }
            Directive::DeleteMessages { ids } => {
                self.delete_all(chat, &ids).await;
                Ok(None)
            }
            Directive::EditMessage { id, text } => {
                self.transport.edit_message(chat, id, &text).await?;
                Ok(None)
            }
        }
    }

    /// Attempt every delete; a failure never stops the rest.
    pub async fn delete_all(&self, chat: ChatId, ids: &[MessageId]) -> DeletionReport {
        let mut report = DeletionReport::default();
        for &id in ids {
            match self.transport.delete_message(chat, id).await {
                Ok(()) => report.deleted.push(id),
                Err(e) => {
                    debug!("Delete of {} in chat {} failed: {}", id, chat, e);
                    report.failed.push((id, e.to_string()));
                }
            }
        }
        if !report.is_clean() {
            warn!(
                "Could not delete {} of {} messages in chat {}",
                report.failed.len(),
                report.attempted(),
                chat
            );
        }
        report
    }
}

pub(crate) fn day_menu() -> Directive {
    Directive::ShowPrompt {
        text: DAY_MENU_TEXT.to_string(),
        choices: DayCode::ALL
            .iter()
            .map(|day| Choice::new(day.label(), Callback::day(*day).to_string()))
            .collect(),
    }
}

pub(crate) fn prompt_directive(prompt: &Prompt) -> Directive {
    let choices = prompt
        .choices()
        .into_iter()
        .map(|label| {
            let callback = match prompt {
                Prompt::Exercise { .. } => Callback::Set(label.to_string()),
                Prompt::ConfirmCompletion => Callback::Done(label == CONFIRM_YES),
            };
            Choice::new(label, callback.to_string())
        })
        .collect();
    Directive::ShowPrompt {
        text: prompt.text(),
        choices,
    }
}
