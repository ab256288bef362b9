use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use setlist::adapter::{
    CONTINUE_TEXT, ChatTransport, Choice, EventKind, InboundEvent, MemoryTransport, WorkoutBot,
};
use setlist::catalog::{DayCode, DayTemplate, ExerciseSpec};
use setlist::session::{ChatId, MessageId, Session, UserId};

const USER: UserId = UserId(100);
const CHAT: ChatId = ChatId(200);

fn bot() -> WorkoutBot<MemoryTransport> {
    WorkoutBot::new(MemoryTransport::new())
}

fn template(exercises: &[(&str, u32)]) -> DayTemplate {
    DayTemplate {
        day: DayCode::Day1,
        label: DayCode::Day1.label(),
        exercises: exercises
            .iter()
            .map(|(name, sets)| ExerciseSpec::new(*name, *sets))
            .collect(),
    }
}

async fn press(bot: &WorkoutBot<MemoryTransport>, chat: ChatId, label: &str) {
    let message = bot
        .transport()
        .latest_with_choices(chat)
        .await
        .expect("a message with buttons");
    let choice = message
        .choice(label)
        .unwrap_or_else(|| panic!("no {:?} button on {:?}", label, message.text))
        .clone();
    bot.handle_callback(USER, chat, message.id, &choice.data)
        .await
        .unwrap();
}

async fn last_text(bot: &WorkoutBot<MemoryTransport>) -> String {
    bot.transport()
        .messages()
        .await
        .last()
        .map(|m| m.text.clone())
        .unwrap_or_default()
}

async fn send(bot: &WorkoutBot<MemoryTransport>, kind: EventKind) {
    bot.handle(InboundEvent::new(USER, CHAT, kind)).await.unwrap();
}

/// Show the day menu, then swap in a short template so flows stay readable.
async fn start_with(bot: &WorkoutBot<MemoryTransport>, exercises: &[(&str, u32)]) -> MessageId {
    send(bot, EventKind::StartWorkout).await;
    let menu = bot.transport().latest_with_choices(CHAT).await.unwrap().id;
    bot.engine()
        .store()
        .put(USER, Session::new(template(exercises), Some(menu)))
        .await;
    send(bot, EventKind::Resume).await;
    menu
}

#[tokio::test]
async fn selecting_a_day_prompts_its_first_exercise() {
    let bot = bot();
    send(&bot, EventKind::StartWorkout).await;
    assert_eq!(last_text(&bot).await, "Choose workout day:");

    press(&bot, CHAT, "Day I (Lower I)").await;
    assert_eq!(last_text(&bot).await, "Standing Calf Raises – Set 1/2");

    let session = bot.engine().store().get(USER).await.unwrap();
    assert_eq!(session.day(), DayCode::Day1);
    assert_eq!(session.pending_message_ids(), &[MessageId(1), MessageId(2)]);
}

#[tokio::test]
async fn done_skip_confirm_cleans_up_and_summarises() {
    let bot = bot();
    start_with(&bot, &[("A", 1), ("B", 1)]).await;
    assert_eq!(last_text(&bot).await, "A – Set 1/1");

    press(&bot, CHAT, "Done").await;
    assert_eq!(last_text(&bot).await, "B – Set 1/1");

    press(&bot, CHAT, "Skip").await;
    assert_eq!(last_text(&bot).await, "Workout complete. Mark it as finished?");

    press(&bot, CHAT, "Yes").await;
    let messages = bot.transport().messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "Workout Summary:\nA – Done\nSkipped – B");
    assert_eq!(bot.transport().deleted().await.len(), 4);
    assert!(bot.engine().store().get(USER).await.is_none());
}

#[tokio::test]
async fn summary_is_sent_even_when_deletes_fail() {
    let bot = bot();
    let menu = start_with(&bot, &[("A", 1)]).await;
    bot.transport().fail_deletes_for([menu]).await;

    press(&bot, CHAT, "+2.5kg").await;
    press(&bot, CHAT, "Yes").await;

    let texts: Vec<_> = bot
        .transport()
        .messages()
        .await
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(
        texts,
        vec![
            "Choose workout day:".to_string(),
            "Workout Summary:\nA – +2.5kg".to_string()
        ]
    );
    assert!(bot.engine().store().is_empty().await);
}

#[tokio::test]
async fn delete_all_reports_each_failure() {
    let bot = bot();
    let keep = bot.transport().send_message(CHAT, "keep", &[]).await.unwrap();
    let drop = bot.transport().send_message(CHAT, "drop", &[]).await.unwrap();
    bot.transport().fail_deletes_for([keep]).await;

    let report = bot
        .delete_all(CHAT, &[keep, MessageId(999), drop])
        .await;
    assert_eq!(report.deleted, vec![drop]);
    assert_eq!(report.attempted(), 3);
    let failed: Vec<_> = report.failed.iter().map(|(id, _)| *id).collect();
    assert_eq!(failed, vec![keep, MessageId(999)]);
}

#[tokio::test]
async fn declining_edits_the_prompt_and_keeps_the_session() {
    let bot = bot();
    start_with(&bot, &[("A", 2)]).await;
    press(&bot, CHAT, "Done").await;
    press(&bot, CHAT, "+1 Rep").await;
    let completion = bot.transport().latest_with_choices(CHAT).await.unwrap();
    assert_eq!(completion.text, "Workout complete. Mark it as finished?");

    press(&bot, CHAT, "No").await;
    let edited = bot.transport().message(completion.id).await.unwrap();
    assert_eq!(edited.text, CONTINUE_TEXT);
    assert!(edited.choices.is_empty());

    let session = bot.engine().store().get(USER).await.unwrap();
    assert_eq!(session.cursor(), 1);
    assert_eq!(session.log().len(), 2);

    send(&bot, EventKind::Resume).await;
    assert_eq!(last_text(&bot).await, "Workout complete. Mark it as finished?");
    press(&bot, CHAT, "Yes").await;
    assert_eq!(last_text(&bot).await, "Workout Summary:\nA – Done\nA – +1 Rep");
}

#[tokio::test]
async fn come_back_requeues_the_exercise() {
    let bot = bot();
    start_with(&bot, &[("A", 1)]).await;
    press(&bot, CHAT, "Come Back").await;
    assert_eq!(last_text(&bot).await, "A – Set 1/1");

    let session = bot.engine().store().get(USER).await.unwrap();
    assert_eq!(session.working_template().len(), 2);
    assert_eq!(session.cursor(), 1);

    press(&bot, CHAT, "Done").await;
    assert_eq!(last_text(&bot).await, "Workout complete. Mark it as finished?");
}

#[tokio::test]
async fn events_without_a_session_are_ignored() {
    let bot = bot();
    bot.handle_callback(USER, CHAT, MessageId(5), "set:Done")
        .await
        .unwrap();
    bot.handle_callback(USER, CHAT, MessageId(5), "done:Yes")
        .await
        .unwrap();
    bot.handle_callback(USER, CHAT, MessageId(5), "done:No")
        .await
        .unwrap();
    send(&bot, EventKind::Resume).await;
    assert!(bot.transport().messages().await.is_empty());
}

#[tokio::test]
async fn bad_payloads_are_ignored() {
    let bot = bot();
    send(&bot, EventKind::StartWorkout).await;
    bot.handle_callback(USER, CHAT, MessageId(1), "day:day9")
        .await
        .unwrap();
    assert!(bot.engine().store().get(USER).await.is_none());

    press(&bot, CHAT, "Day II (Upper I)").await;
    let before = bot.engine().store().get(USER).await.unwrap();
    bot.handle_callback(USER, CHAT, MessageId(2), "set:+10kg")
        .await
        .unwrap();
    bot.handle_callback(USER, CHAT, MessageId(2), "stretch")
        .await
        .unwrap();
    let after = bot.engine().store().get(USER).await.unwrap();
    assert_eq!(after.log(), before.log());
    assert_eq!(after.cursor(), before.cursor());
    assert_eq!(last_text(&bot).await, "Powerlifting Incline Bench – Set 1/3");
}

#[tokio::test]
async fn reselecting_a_day_starts_over() {
    let bot = bot();
    send(&bot, EventKind::StartWorkout).await;
    press(&bot, CHAT, "Day I (Lower I)").await;
    press(&bot, CHAT, "Done").await;
    send(&bot, EventKind::StartWorkout).await;
    press(&bot, CHAT, "Day V (Aesthetic)").await;

    let session = bot.engine().store().get(USER).await.unwrap();
    assert_eq!(session.day(), DayCode::Day5);
    assert!(session.log().is_empty());
    assert_eq!(last_text(&bot).await, "Powerlifting Incline Bench – Set 1/3");
}

#[tokio::test]
async fn users_progress_independently() {
    let bot = Arc::new(bot());
    let run = |user: UserId, chat: ChatId, day: &'static str, presses: usize| {
        let bot = Arc::clone(&bot);
        async move {
            bot.handle(InboundEvent::new(
                user,
                chat,
                EventKind::SelectDay {
                    day_code: day.to_string(),
                    message: MessageId(0),
                },
            ))
            .await
            .unwrap();
            for _ in 0..presses {
                let message = bot.transport().latest_with_choices(chat).await.unwrap();
                let done = message.choice("Done").unwrap().data.clone();
                bot.handle_callback(user, chat, message.id, &done)
                    .await
                    .unwrap();
            }
        }
    };

    tokio::join!(
        run(UserId(1), ChatId(1), "day1", 2),
        run(UserId(2), ChatId(2), "day2", 4),
    );

    let first = bot.engine().store().get(UserId(1)).await.unwrap();
    let second = bot.engine().store().get(UserId(2)).await.unwrap();
    assert_eq!(first.cursor(), 1);
    assert_eq!(first.log().len(), 2);
    assert_eq!(second.cursor(), 2);
    assert_eq!(second.log().len(), 4);
}

struct OfflineTransport;

#[async_trait]
impl ChatTransport for OfflineTransport {
    fn name(&self) -> &str {
        "offline"
    }

    async fn send_message(
        &self,
        _chat: ChatId,
        _text: &str,
        _choices: &[Choice],
    ) -> anyhow::Result<MessageId> {
        Err(anyhow!("network unreachable"))
    }

    async fn delete_message(&self, _chat: ChatId, _id: MessageId) -> anyhow::Result<()> {
        Err(anyhow!("network unreachable"))
    }

    async fn edit_message(&self, _chat: ChatId, _id: MessageId, _text: &str) -> anyhow::Result<()> {
        Err(anyhow!("network unreachable"))
    }
}

#[tokio::test]
async fn transport_failures_reach_the_caller() {
    let bot = WorkoutBot::new(OfflineTransport);
    let result = bot
        .handle(InboundEvent::new(USER, CHAT, EventKind::StartWorkout))
        .await;
    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("network unreachable"));
}
