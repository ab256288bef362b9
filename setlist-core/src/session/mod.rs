//! Session module: the per-user workout state machine.
//!
//! A `Session` walks a copy of a day template. Progression lives in
//! `workout.rs`, completion in `summary.rs`, and the store-backed
//! `WorkoutEngine` in `engine.rs` ties sessions to users.

mod engine;
mod ids;
mod prompt;
mod session;
mod sets;
mod summary;
mod workout;

pub use engine::WorkoutEngine;
pub use ids::{ChatId, MessageId, UserId};
pub use prompt::{COMPLETION_TEXT, CONFIRM_NO, CONFIRM_YES, Prompt};
pub use session::Session;
pub use sets::{LoggedAction, SetAction, SetRecord};
pub use summary::{Completion, SUMMARY_HEADER, summary_message};
