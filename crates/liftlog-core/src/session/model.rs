//! Session domain model.
//!
//! This module contains the working copy of one workout day and the frozen
//! snapshot it is compared against.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;
use uuid::Uuid;

/// Catalog identifier of an exercise (stable across sessions).
pub type ExerciseTemplateId = i64;

/// Routine template id carried by every free-form session.
pub const FREEFORM_ROUTINE_ID: &str = "custom";

/// Where a session's baseline comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionKind {
    /// Derived from a server-stored routine template.
    Scheduled,
    /// Ad-hoc session that only lives in the local journal.
    Freeform,
}

/// One performed (or planned) set of an exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    /// 1-based position inside the exercise
    pub set_number: u32,
    /// Load in kilograms
    pub weight: f64,
    /// Repetitions
    pub reps: u32,
    /// Completion check (volatile)
    #[serde(default)]
    pub completed: bool,
    /// List-rendering identity only (volatile)
    #[serde(default)]
    pub record_id: String,
}

impl SetEntry {
    /// Creates a zeroed set with a fresh record id.
    pub fn empty(set_number: u32) -> Self {
        Self {
            set_number,
            weight: 0.0,
            reps: 0,
            completed: false,
            record_id: new_record_id(),
        }
    }
}

/// One exercise of a session together with its sets.
///
/// `sets` is never empty while the entry exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseEntry {
    pub exercise_template_id: ExerciseTemplateId,
    /// Display name from the exercise catalog
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub memo: String,
    pub sets: Vec<SetEntry>,
}

impl ExerciseEntry {
    /// Creates an entry holding a single zeroed set.
    pub fn new(exercise_template_id: ExerciseTemplateId, exercise_name: impl Into<String>) -> Self {
        Self {
            exercise_template_id,
            exercise_name: exercise_name.into(),
            memo: String::new(),
            sets: vec![SetEntry::empty(1)],
        }
    }

    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|set| set.completed).count()
    }
}

/// The in-memory working copy of one workout day.
///
/// `save_date` stays `None` until the first edit so that an untouched session
/// never shows up in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub kind: SessionKind,
    /// Originating routine template, or [`FREEFORM_ROUTINE_ID`]
    pub routine_template_id: String,
    pub session_name: String,
    /// Canonical `YYYY-MM-DD HH:mm:ss` timestamp of the logical day
    pub save_date: Option<String>,
    #[serde(default)]
    pub memo: String,
    pub exercises: Vec<ExerciseEntry>,
}

impl Session {
    /// Creates an empty free-form session.
    pub fn freeform(session_name: impl Into<String>) -> Self {
        Self {
            kind: SessionKind::Freeform,
            routine_template_id: FREEFORM_ROUTINE_ID.to_string(),
            session_name: session_name.into(),
            save_date: None,
            memo: String::new(),
            exercises: Vec::new(),
        }
    }

    pub fn is_freeform(&self) -> bool {
        self.kind == SessionKind::Freeform
    }

    pub fn exercise(&self, exercise_id: ExerciseTemplateId) -> Option<&ExerciseEntry> {
        self.exercises
            .iter()
            .find(|entry| entry.exercise_template_id == exercise_id)
    }

    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|entry| entry.sets.len()).sum()
    }

    pub fn completed_set_count(&self) -> usize {
        self.exercises.iter().map(ExerciseEntry::completed_sets).sum()
    }
}

/// Immutable snapshot of a session taken at load time.
///
/// Only read access is exposed; diffing is its sole purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline(Arc<Session>);

impl Baseline {
    /// Freezes a structural copy of `session`.
    pub fn freeze(session: &Session) -> Self {
        Self(Arc::new(session.clone()))
    }
}

impl Deref for Baseline {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.0
    }
}

/// Generates a synthetic list-rendering id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
