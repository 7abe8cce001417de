use crate::session::{
    ExerciseEntry, FREEFORM_ROUTINE_ID, IdentityKey, Session, SessionKind,
};
use crate::timestamp::date_only;
use serde::{Deserialize, Serialize};

fn default_kind() -> SessionKind {
    SessionKind::Freeform
}

fn default_routine_template_id() -> String {
    FREEFORM_ROUTINE_ID.to_string()
}

/// Persisted form of a session inside the local journal.
///
/// Unlike [`Session`], a record always has a save date. Entries written before
/// scheduled sessions were journaled carry no `kind` and read as free-form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    #[serde(default = "default_kind")]
    pub kind: SessionKind,
    #[serde(default = "default_routine_template_id")]
    pub routine_template_id: String,
    pub session_name: String,
    pub save_date: String,
    #[serde(default)]
    pub memo: String,
    #[serde(default)]
    pub exercises: Vec<ExerciseEntry>,
}

impl JournalRecord {
    /// Captures a session for the journal.
    ///
    /// Returns `None` for a session that was never touched (no save date).
    pub fn from_session(session: &Session) -> Option<Self> {
        let save_date = session.save_date.clone()?;
        Some(Self {
            kind: session.kind,
            routine_template_id: session.routine_template_id.clone(),
            session_name: session.session_name.clone(),
            save_date,
            memo: session.memo.clone(),
            exercises: session.exercises.clone(),
        })
    }

    /// Restores the working copy this record was taken from.
    pub fn into_session(self) -> Session {
        Session {
            kind: self.kind,
            routine_template_id: self.routine_template_id,
            session_name: self.session_name,
            save_date: Some(self.save_date),
            memo: self.memo,
            exercises: self.exercises,
        }
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::from_parts(
            self.kind,
            &self.routine_template_id,
            &self.session_name,
            &self.save_date,
        )
    }

    /// Calendar day (`YYYY-MM-DD`) of the record.
    pub fn day(&self) -> &str {
        date_only(&self.save_date)
    }

    pub fn set_count(&self) -> usize {
        self.exercises.iter().map(|entry| entry.sets.len()).sum()
    }
}
