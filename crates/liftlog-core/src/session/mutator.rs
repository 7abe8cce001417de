//! Pure edit operations on a [`Session`].
//!
//! Every operation borrows the current session and returns a new one; a
//! rejected edit returns a [`MutationError`] and the caller keeps the old value.
//! Each successful edit also stamps a save date on a session that has none yet.

use super::model::{ExerciseEntry, ExerciseTemplateId, Session, SessionKind, SetEntry};
use crate::clock::Clock;
use crate::timestamp::save_date_for;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Numeric field of a set that can be edited directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Weight,
    Reps,
}

/// Reasons an edit is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("exercise {exercise_id} must keep at least one set")]
    LastSetRemaining { exercise_id: ExerciseTemplateId },

    #[error("exercise {exercise_id} is not part of this session")]
    ExerciseNotFound { exercise_id: ExerciseTemplateId },

    #[error("exercise {exercise_id} has no set at index {set_index}")]
    SetNotFound {
        exercise_id: ExerciseTemplateId,
        set_index: usize,
    },

    #[error("exercise {exercise_id} is already part of this session")]
    DuplicateExercise { exercise_id: ExerciseTemplateId },

    #[error("free-form session titles are derived from their date")]
    TitleNotEditable,

    #[error("'{input}' is not a number")]
    NotNumeric { input: String },
}

/// Applies user edits to sessions.
///
/// Holds the clock and the explicit target day used to initialize a missing
/// save date.
#[derive(Clone)]
pub struct SessionMutator {
    clock: Arc<dyn Clock>,
    target_date: Option<NaiveDate>,
}

impl SessionMutator {
    pub fn new(clock: Arc<dyn Clock>, target_date: Option<NaiveDate>) -> Self {
        Self { clock, target_date }
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.target_date
    }

    /// Replaces the weight or reps of one set.
    ///
    /// Meant to be applied when the input is committed: a cleared input becomes
    /// 0 and negative values are clamped to 0. Reps beyond `u32::MAX` are
    /// rejected as not numeric.
    pub fn set_value(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
        field: SetField,
        input: &str,
    ) -> Result<Session, MutationError> {
        let value = parse_numeric(input)?;
        if matches!(field, SetField::Reps) && value.round() > f64::from(u32::MAX) {
            return Err(MutationError::NotNumeric {
                input: input.to_string(),
            });
        }
        self.edit_set(session, exercise_id, set_index, |set| match field {
            SetField::Weight => set.weight = value,
            SetField::Reps => set.reps = value.round() as u32,
        })
    }

    /// Flips the completion check of one set.
    pub fn toggle_completed(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
    ) -> Result<Session, MutationError> {
        self.edit_set(session, exercise_id, set_index, |set| {
            set.completed = !set.completed;
        })
    }

    /// Appends a zeroed set to an exercise.
    pub fn add_set(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
    ) -> Result<Session, MutationError> {
        self.edit_exercise(session, exercise_id, |entry| {
            let set_number = entry.sets.len() as u32 + 1;
            entry.sets.push(SetEntry::empty(set_number));
            Ok(())
        })
    }

    /// Removes one set and renumbers the rest from 1.
    ///
    /// Refused when it would leave the exercise without sets.
    pub fn delete_set(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
    ) -> Result<Session, MutationError> {
        self.edit_exercise(session, exercise_id, |entry| {
            if set_index >= entry.sets.len() {
                return Err(MutationError::SetNotFound {
                    exercise_id,
                    set_index,
                });
            }
            if entry.sets.len() == 1 {
                return Err(MutationError::LastSetRemaining { exercise_id });
            }
            entry.sets.remove(set_index);
            renumber(&mut entry.sets);
            Ok(())
        })
    }

    /// Removes a whole exercise. Confirmation is the caller's concern.
    pub fn remove_exercise(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
    ) -> Result<Session, MutationError> {
        let position = position_of(session, exercise_id)?;
        let mut next = self.prepare(session);
        next.exercises.remove(position);
        Ok(next)
    }

    /// Appends a catalog exercise with one zeroed set.
    pub fn add_exercise(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        exercise_name: &str,
    ) -> Result<Session, MutationError> {
        if session.exercise(exercise_id).is_some() {
            return Err(MutationError::DuplicateExercise { exercise_id });
        }
        let mut next = self.prepare(session);
        next.exercises
            .push(ExerciseEntry::new(exercise_id, exercise_name));
        Ok(next)
    }

    /// Replaces the memo of one exercise.
    pub fn edit_memo(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        text: &str,
    ) -> Result<Session, MutationError> {
        self.edit_exercise(session, exercise_id, |entry| {
            entry.memo = text.to_string();
            Ok(())
        })
    }

    /// Renames a scheduled session.
    pub fn edit_title(&self, session: &Session, text: &str) -> Result<Session, MutationError> {
        if session.kind != SessionKind::Scheduled {
            return Err(MutationError::TitleNotEditable);
        }
        let mut next = self.prepare(session);
        next.session_name = text.to_string();
        Ok(next)
    }

    /// Clones the session and makes sure it carries a save date.
    fn prepare(&self, session: &Session) -> Session {
        let mut next = session.clone();
        if next.save_date.is_none() {
            next.save_date = Some(save_date_for(self.target_date, self.clock.now()));
        }
        next
    }

    fn edit_exercise<F>(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        edit: F,
    ) -> Result<Session, MutationError>
    where
        F: FnOnce(&mut ExerciseEntry) -> Result<(), MutationError>,
    {
        let position = position_of(session, exercise_id)?;
        let mut next = self.prepare(session);
        edit(&mut next.exercises[position])?;
        Ok(next)
    }

    fn edit_set<F>(
        &self,
        session: &Session,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
        edit: F,
    ) -> Result<Session, MutationError>
    where
        F: FnOnce(&mut SetEntry),
    {
        self.edit_exercise(session, exercise_id, |entry| {
            let set = entry
                .sets
                .get_mut(set_index)
                .ok_or(MutationError::SetNotFound {
                    exercise_id,
                    set_index,
                })?;
            edit(set);
            Ok(())
        })
    }
}

fn position_of(session: &Session, exercise_id: ExerciseTemplateId) -> Result<usize, MutationError> {
    session
        .exercises
        .iter()
        .position(|entry| entry.exercise_template_id == exercise_id)
        .ok_or(MutationError::ExerciseNotFound { exercise_id })
}

fn renumber(sets: &mut [SetEntry]) {
    for (index, set) in sets.iter_mut().enumerate() {
        set.set_number = index as u32 + 1;
    }
}

fn parse_numeric(input: &str) -> Result<f64, MutationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value.max(0.0)),
        _ => Err(MutationError::NotNumeric {
            input: input.to_string(),
        }),
    }
}
