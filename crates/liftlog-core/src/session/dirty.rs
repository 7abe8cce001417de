//! Unsaved-changes detection.

use super::model::{ExerciseEntry, ExerciseTemplateId, Session, SessionKind, SetEntry};

/// Comparison view of a session without its volatile fields
/// (`completed`, `record_id`, `save_date`).
#[derive(Debug, PartialEq)]
struct SessionProjection<'a> {
    kind: SessionKind,
    routine_template_id: &'a str,
    session_name: &'a str,
    memo: &'a str,
    exercises: Vec<ExerciseProjection<'a>>,
}

#[derive(Debug, PartialEq)]
struct ExerciseProjection<'a> {
    exercise_template_id: ExerciseTemplateId,
    exercise_name: &'a str,
    memo: &'a str,
    sets: Vec<SetProjection>,
}

#[derive(Debug, PartialEq)]
struct SetProjection {
    set_number: u32,
    weight: f64,
    reps: u32,
}

impl<'a> From<&'a Session> for SessionProjection<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            kind: session.kind,
            routine_template_id: &session.routine_template_id,
            session_name: &session.session_name,
            memo: &session.memo,
            exercises: session.exercises.iter().map(Into::into).collect(),
        }
    }
}

impl<'a> From<&'a ExerciseEntry> for ExerciseProjection<'a> {
    fn from(entry: &'a ExerciseEntry) -> Self {
        Self {
            exercise_template_id: entry.exercise_template_id,
            exercise_name: &entry.exercise_name,
            memo: &entry.memo,
            sets: entry.sets.iter().map(Into::into).collect(),
        }
    }
}

impl From<&SetEntry> for SetProjection {
    fn from(set: &SetEntry) -> Self {
        Self {
            set_number: set.set_number,
            weight: set.weight,
            reps: set.reps,
        }
    }
}

/// Reports whether `session` structurally differs from `baseline`.
///
/// Free-form sessions are journaled continuously and have no commit step, so
/// they are never reported dirty.
pub fn is_dirty(session: &Session, baseline: &Session) -> bool {
    if session.kind == SessionKind::Freeform {
        return false;
    }
    SessionProjection::from(session) != SessionProjection::from(baseline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::{Baseline, ExerciseEntry};

    fn scheduled() -> Session {
        Session {
            kind: SessionKind::Scheduled,
            routine_template_id: "12".to_string(),
            session_name: "Upper A".to_string(),
            save_date: None,
            memo: String::new(),
            exercises: vec![ExerciseEntry::new(1, "Bench press")],
        }
    }

    #[test]
    fn test_identical_copy_is_clean() {
        let session = scheduled();
        let baseline = Baseline::freeze(&session);
        assert!(!is_dirty(&session, &baseline));
    }

    #[test]
    fn test_volatile_fields_are_ignored() {
        let session = scheduled();
        let baseline = Baseline::freeze(&session);

        let mut edited = session.clone();
        edited.exercises[0].sets[0].completed = true;
        edited.exercises[0].sets[0].record_id = "other".to_string();
        edited.save_date = Some("2024-06-01 10:00:00".to_string());

        assert!(!is_dirty(&edited, &baseline));
    }

    #[test]
    fn test_structural_changes_are_dirty() {
        let session = scheduled();
        let baseline = Baseline::freeze(&session);

        let mut heavier = session.clone();
        heavier.exercises[0].sets[0].weight = 80.0;
        assert!(is_dirty(&heavier, &baseline));

        let mut noted = session.clone();
        noted.exercises[0].memo = "slow eccentric".to_string();
        assert!(is_dirty(&noted, &baseline));

        let mut renamed = session.clone();
        renamed.session_name = "Upper B".to_string();
        assert!(is_dirty(&renamed, &baseline));
    }

    #[test]
    fn test_freeform_is_never_dirty() {
        let mut session = Session::freeform("자유 운동");
        let baseline = Baseline::freeze(&session);
        session.exercises.push(ExerciseEntry::new(4, "Curl"));
        assert!(!is_dirty(&session, &baseline));
    }
}
