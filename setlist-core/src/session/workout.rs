//! Exercise and set progression.

use log::{debug, warn};

use crate::session::{Prompt, Session, SetAction, SetRecord};

impl Session {
    /// Compute the next prompt, moving the cursor past every exercise whose
    /// target is already met.
    pub fn advance(&mut self) -> Prompt {
        while let Some(spec) = self.working_template.get(self.cursor) {
            let done = self.completed_sets(&spec.name);
            if done < spec.target_sets {
                return Prompt::Exercise {
                    exercise: spec.name.clone(),
                    set_number: done + 1,
                    target_sets: spec.target_sets,
                };
            }
            debug!(
                "Session::advance {} satisfied ({}/{}), moving past index {}",
                spec.name, done, spec.target_sets, self.cursor
            );
            self.cursor += 1;
        }
        Prompt::ConfirmCompletion
    }

    /// Apply a button press to the exercise under the cursor.
    ///
    /// Once the template is exhausted, presses are ignored and the completion
    /// prompt is issued again.
    pub fn apply(&mut self, action: SetAction) -> Prompt {
        let Some(spec) = self.working_template.get(self.cursor).cloned() else {
            warn!(
                "Session::apply {} after the last exercise; re-issuing completion prompt",
                action
            );
            return Prompt::ConfirmCompletion;
        };

        match action {
            SetAction::IncrementRep | SetAction::IncrementLoad | SetAction::SetDone => {
                if let Some(logged) = action.completed_set() {
                    self.log.push(SetRecord::new(spec.name, logged));
                }
            }
            SetAction::Skip => {
                debug!("Session::apply skipping {}", spec.name);
                self.log.push(SetRecord::skipped(spec.name));
                self.cursor += 1;
            }
            SetAction::Defer => {
                debug!("Session::apply deferring {} to the end", spec.name);
                self.working_template.push(spec);
                self.cursor += 1;
            }
        }

        self.advance()
    }
}
