use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::catalog::{DayCode, DayTemplate, ExerciseSpec};
use crate::session::{MessageId, SetRecord};

/// One user's in-progress workout.
///
/// `working_template` starts as a copy of the day's exercises and only grows
/// (a deferred exercise is appended to the end). `cursor` points at the
/// exercise being prompted and never moves backwards; it equals the template
/// length once every entry has been passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub(crate) day: DayCode,
    pub(crate) working_template: Vec<ExerciseSpec>,
    pub(crate) cursor: usize,
    pub(crate) log: Vec<SetRecord>,
    pub(crate) pending_message_ids: Vec<MessageId>,
    pub(crate) started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(template: DayTemplate, trigger: Option<MessageId>) -> Self {
        debug!(
            "Session::new day={} exercises={}",
            template.day,
            template.exercises.len()
        );
        Self {
            day: template.day,
            working_template: template.exercises,
            cursor: 0,
            log: Vec::new(),
            pending_message_ids: trigger.into_iter().collect(),
            started_at: Utc::now(),
        }
    }

    pub fn day(&self) -> DayCode {
        self.day
    }

    pub fn working_template(&self) -> &[ExerciseSpec] {
        &self.working_template
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn log(&self) -> &[SetRecord] {
        &self.log
    }

    pub fn pending_message_ids(&self) -> &[MessageId] {
        &self.pending_message_ids
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn current_exercise(&self) -> Option<&ExerciseSpec> {
        self.working_template.get(self.cursor)
    }

    pub fn is_awaiting_completion(&self) -> bool {
        self.cursor >= self.working_template.len()
    }

    /// Sets logged toward `exercise`, across every occurrence in the template.
    pub fn completed_sets(&self, exercise: &str) -> u32 {
        self.log.iter().filter(|r| r.counts_toward(exercise)).count() as u32
    }

    /// Remember a delivered message so it can be cleaned up on completion.
    pub fn record_message(&mut self, id: MessageId) {
        if !self.pending_message_ids.contains(&id) {
            self.pending_message_ids.push(id);
        }
    }
}
