//! Identity of a session record.
//!
//! Two sessions collide if and only if their keys are equal. Merge and replace
//! decisions everywhere in the engine go through [`IdentityKey`].

use super::model::{Session, SessionKind};
use crate::timestamp::date_only;
use serde::{Deserialize, Serialize};
use std::fmt;

const SEPARATOR: char = '|';

/// Deterministic "same session" key.
///
/// - free-form: `YYYY-MM-DD|<session name>`
/// - scheduled: `<routine template id>|YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Builds a key from the identifying parts of a session or record.
    pub fn from_parts(
        kind: SessionKind,
        routine_template_id: &str,
        session_name: &str,
        save_date: &str,
    ) -> Self {
        let day = date_only(save_date);
        match kind {
            SessionKind::Freeform => Self(format!("{day}{SEPARATOR}{session_name}")),
            SessionKind::Scheduled => Self(format!("{routine_template_id}{SEPARATOR}{day}")),
        }
    }

    /// Key of a free-form session for the given day and name.
    pub fn freeform(day: &str, session_name: &str) -> Self {
        Self::from_parts(SessionKind::Freeform, "", session_name, day)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Computes the identity of a session.
///
/// Returns `None` while the session has no save date; such a session has not
/// been touched and must not be persisted.
pub fn identity_key(session: &Session) -> Option<IdentityKey> {
    session.save_date.as_deref().map(|save_date| {
        IdentityKey::from_parts(
            session.kind,
            &session.routine_template_id,
            &session.session_name,
            save_date,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::{ExerciseEntry, Session};

    fn freeform_on(save_date: &str) -> Session {
        let mut session = Session::freeform("자유 운동");
        session.save_date = Some(save_date.to_string());
        session
    }

    #[test]
    fn test_freeform_key_uses_day_and_name() {
        let key = identity_key(&freeform_on("2024-06-01 09:30:00")).unwrap();
        assert_eq!(key.as_str(), "2024-06-01|자유 운동");
        assert_eq!(key, IdentityKey::freeform("2024-06-01", "자유 운동"));
    }

    #[test]
    fn test_scheduled_key_uses_template_and_day() {
        let session = Session {
            kind: SessionKind::Scheduled,
            routine_template_id: "42".to_string(),
            session_name: "Push day".to_string(),
            save_date: Some("2024-06-01 09:30:00".to_string()),
            memo: String::new(),
            exercises: Vec::new(),
        };
        assert_eq!(identity_key(&session).unwrap().as_str(), "42|2024-06-01");
    }

    #[test]
    fn test_key_ignores_time_of_day_and_content() {
        let morning = freeform_on("2024-06-01 06:00:00");
        let mut evening = freeform_on("2024-06-01 21:15:42");
        evening.exercises.push(ExerciseEntry::new(9, "Deadlift"));
        assert_eq!(identity_key(&morning), identity_key(&evening));
    }

    #[test]
    fn test_untouched_session_has_no_key() {
        assert!(identity_key(&Session::freeform("자유 운동")).is_none());
    }
}
