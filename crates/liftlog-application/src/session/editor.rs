//! Editing use case for one open routine-execution screen.
//!
//! `WorkoutEditor` runs each edit through the mutator, keeps the dirty flag
//! current and journals the result:
//!
//! - Free-form sessions are journaled after every edit.
//! - Scheduled sessions are journaled when a completion check is toggled.

use super::resolver::ResolvedSession;
use super::sync::PersistenceSync;
use liftlog_core::LiftlogError;
use liftlog_core::error::Result;
use liftlog_core::routine::RoutineService;
use liftlog_core::session::{
    Baseline, ExerciseTemplateId, MutationError, Session, SessionMutator, SetField, identity_key,
    is_dirty,
};
use std::sync::Arc;

/// When an edit is written to the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Persist {
    /// Only free-form sessions are journaled.
    FreeformOnly,
    /// Every session kind is journaled.
    Always,
}

/// Working session of one screen plus everything needed to edit and save it.
pub struct WorkoutEditor {
    session: Session,
    baseline: Baseline,
    mutator: SessionMutator,
    sync: PersistenceSync,
    routine_service: Arc<dyn RoutineService>,
}

impl WorkoutEditor {
    pub fn new(
        resolved: ResolvedSession,
        mutator: SessionMutator,
        sync: PersistenceSync,
        routine_service: Arc<dyn RoutineService>,
    ) -> Self {
        Self {
            session: resolved.session,
            baseline: resolved.baseline,
            mutator,
            sync,
            routine_service,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// Whether the save action should be offered.
    pub fn is_dirty(&self) -> bool {
        is_dirty(&self.session, &self.baseline)
    }

    pub fn set_value(
        &mut self,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
        field: SetField,
        input: &str,
    ) -> Result<()> {
        self.apply("set_value", Persist::FreeformOnly, |mutator, session| {
            mutator.set_value(session, exercise_id, set_index, field, input)
        })
    }

    pub fn toggle_completed(
        &mut self,
        exercise_id: ExerciseTemplateId,
        set_index: usize,
    ) -> Result<()> {
        self.apply("toggle_completed", Persist::Always, |mutator, session| {
            mutator.toggle_completed(session, exercise_id, set_index)
        })
    }

    pub fn add_set(&mut self, exercise_id: ExerciseTemplateId) -> Result<()> {
        self.apply("add_set", Persist::FreeformOnly, |mutator, session| {
            mutator.add_set(session, exercise_id)
        })
    }

    /// Deletes one set. Deleting the last set of an exercise is rejected with
    /// [`MutationError::LastSetRemaining`] and leaves the session unchanged.
    pub fn delete_set(&mut self, exercise_id: ExerciseTemplateId, set_index: usize) -> Result<()> {
        self.apply("delete_set", Persist::FreeformOnly, |mutator, session| {
            mutator.delete_set(session, exercise_id, set_index)
        })
    }

    /// Removes a whole exercise. The caller asks the user for confirmation first.
    pub fn remove_exercise(&mut self, exercise_id: ExerciseTemplateId) -> Result<()> {
        self.apply("remove_exercise", Persist::FreeformOnly, |mutator, session| {
            mutator.remove_exercise(session, exercise_id)
        })
    }

    pub fn add_exercise(
        &mut self,
        exercise_id: ExerciseTemplateId,
        exercise_name: &str,
    ) -> Result<()> {
        self.apply("add_exercise", Persist::FreeformOnly, |mutator, session| {
            mutator.add_exercise(session, exercise_id, exercise_name)
        })
    }

    pub fn edit_memo(&mut self, exercise_id: ExerciseTemplateId, text: &str) -> Result<()> {
        self.apply("edit_memo", Persist::FreeformOnly, |mutator, session| {
            mutator.edit_memo(session, exercise_id, text)
        })
    }

    pub fn edit_title(&mut self, text: &str) -> Result<()> {
        self.apply("edit_title", Persist::FreeformOnly, |mutator, session| {
            mutator.edit_title(session, text)
        })
    }

    /// Records the session with the routine backend.
    ///
    /// Refused while no set is completed. On success the session's journal
    /// record is dropped.
    pub async fn submit(&mut self) -> Result<()> {
        if self.session.completed_set_count() == 0 {
            return Err(LiftlogError::invalid_state(
                "Complete at least one set before recording the workout",
            ));
        }

        self.routine_service.record_session(&self.session).await?;

        if let Some(key) = identity_key(&self.session) {
            self.sync.remove(&key)?;
        }
        tracing::info!(
            "[WorkoutEditor] Recorded '{}' ({} completed sets)",
            self.session.session_name,
            self.session.completed_set_count()
        );
        Ok(())
    }

    /// Stores the edited routine as the new template.
    ///
    /// Only scheduled sessions have a template. On success the baseline is
    /// re-frozen so the session is no longer dirty.
    pub async fn save_template(&mut self) -> Result<()> {
        if self.session.is_freeform() {
            return Err(LiftlogError::invalid_state(
                "A free-form session has no routine template to save",
            ));
        }

        self.routine_service.update_routine(&self.session).await?;
        self.baseline = Baseline::freeze(&self.session);
        tracing::info!(
            "[WorkoutEditor] Saved routine {}",
            self.session.routine_template_id
        );
        Ok(())
    }

    fn apply<F>(&mut self, operation: &'static str, persist: Persist, edit: F) -> Result<()>
    where
        F: FnOnce(&SessionMutator, &Session) -> std::result::Result<Session, MutationError>,
    {
        let next = edit(&self.mutator, &self.session).inspect_err(|e| {
            tracing::warn!("[WorkoutEditor] {} rejected: {}", operation, e);
        })?;
        if persist == Persist::Always || next.is_freeform() {
            self.sync.upsert(&next).inspect_err(|e| {
                tracing::warn!("[WorkoutEditor] {} not persisted, discarded: {}", operation, e);
            })?;
        }
        self.session = next;
        tracing::debug!(
            "[WorkoutEditor] {} applied, dirty={}",
            operation,
            self.is_dirty()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BaselineResolver;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use liftlog_core::clock::{Clock, FixedClock};
    use liftlog_core::journal::JournalStore;
    use liftlog_core::routine::{RouteParam, RoutineExercise, RoutineSet, RoutineTemplate};
    use liftlog_core::session::SessionKind;
    use liftlog_infrastructure::{FileJournalStore, MemoryJournalStore};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct MockRoutineService {
        recorded: Mutex<Vec<Session>>,
        updated: Mutex<Vec<Session>>,
        fail_writes: bool,
    }

    #[async_trait]
    impl RoutineService for MockRoutineService {
        async fn fetch_routine(
            &self,
            routine_id: &str,
            _member_id: Option<&str>,
        ) -> Result<RoutineTemplate> {
            Ok(RoutineTemplate {
                routine_id: routine_id.to_string(),
                routine_name: "Push".to_string(),
                exercises: vec![RoutineExercise {
                    exercise_template_id: 3,
                    exercise_name: "Bench press".to_string(),
                    memo: String::new(),
                    sets: vec![RoutineSet {
                        record_id: None,
                        weight: 60.0,
                        reps: 10,
                    }],
                }],
            })
        }

        async fn record_session(&self, session: &Session) -> Result<()> {
            if self.fail_writes {
                return Err(LiftlogError::remote("server said no"));
            }
            self.recorded.lock().unwrap().push(session.clone());
            Ok(())
        }

        async fn update_routine(&self, session: &Session) -> Result<()> {
            if self.fail_writes {
                return Err(LiftlogError::remote("server said no"));
            }
            self.updated.lock().unwrap().push(session.clone());
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<MemoryJournalStore>,
        service: Arc<MockRoutineService>,
        clock: Arc<dyn Clock>,
    }

    impl Fixture {
        fn new(service: MockRoutineService) -> Self {
            let now =
                NaiveDateTime::parse_from_str("2024-06-01 14:05:09", "%Y-%m-%d %H:%M:%S")
                    .unwrap();
            Self {
                store: Arc::new(MemoryJournalStore::new()),
                service: Arc::new(service),
                clock: Arc::new(FixedClock(now)),
            }
        }

        async fn open(&self, route: &str) -> WorkoutEditor {
            let resolver = BaselineResolver::new(
                self.service.clone(),
                self.store.clone(),
                self.clock.clone(),
                "자유 운동",
            );
            let route = RouteParam::parse(route, None).unwrap();
            let resolved = resolver.resolve(&route, None).await.unwrap();
            WorkoutEditor::new(
                resolved,
                SessionMutator::new(self.clock.clone(), None),
                PersistenceSync::new(self.store.clone()),
                self.service.clone(),
            )
        }
    }

    #[tokio::test]
    async fn test_freeform_edits_are_journaled_and_never_dirty() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("custom").await;

        editor.add_exercise(3, "Bench press").unwrap();
        editor.set_value(3, 0, SetField::Weight, "62.5").unwrap();

        assert!(!editor.is_dirty());
        let journal = fixture.store.read_all();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].save_date, "2024-06-01 14:05:09");
        assert_eq!(journal[0].exercises[0].sets[0].weight, 62.5);
    }

    #[tokio::test]
    async fn test_scheduled_edits_are_journaled_on_toggle_only() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("12").await;

        editor.add_set(3).unwrap();
        assert!(editor.is_dirty());
        assert!(fixture.store.read_all().is_empty());

        editor.toggle_completed(3, 0).unwrap();
        let journal = fixture.store.read_all();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].kind, SessionKind::Scheduled);
        assert_eq!(journal[0].identity_key().as_str(), "12|2024-06-01");
    }

    #[tokio::test]
    async fn test_rejected_edit_leaves_session_unchanged() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("12").await;
        let before = editor.session().clone();

        let err = editor.delete_set(3, 0).unwrap_err();

        assert_eq!(
            err.as_mutation(),
            Some(&MutationError::LastSetRemaining { exercise_id: 3 })
        );
        assert_eq!(editor.session(), &before);
    }

    #[tokio::test]
    async fn test_title_is_not_editable_for_freeform() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("custom").await;

        let err = editor.edit_title("Arms").unwrap_err();
        assert!(err.is_mutation());
        assert!(fixture.store.read_all().is_empty());
    }

    #[tokio::test]
    async fn test_submit_requires_a_completed_set() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("custom").await;
        editor.add_exercise(3, "Bench press").unwrap();

        let err = editor.submit().await.unwrap_err();
        assert!(err.is_invalid_state());
        assert!(fixture.service.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_clears_the_journal_record() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("custom").await;
        editor.add_exercise(3, "Bench press").unwrap();
        editor.toggle_completed(3, 0).unwrap();
        assert_eq!(fixture.store.read_all().len(), 1);

        editor.submit().await.unwrap();

        assert_eq!(fixture.service.recorded.lock().unwrap().len(), 1);
        assert!(fixture.store.read_all().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_the_journal_record() {
        let fixture = Fixture::new(MockRoutineService {
            fail_writes: true,
            ..Default::default()
        });
        let mut editor = fixture.open("custom").await;
        editor.add_exercise(3, "Bench press").unwrap();
        editor.toggle_completed(3, 0).unwrap();

        assert!(editor.submit().await.is_err());
        assert_eq!(fixture.store.read_all().len(), 1);
    }

    #[tokio::test]
    async fn test_save_template_refreezes_baseline() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("12").await;
        editor.edit_title("Push (deload)").unwrap();
        assert!(editor.is_dirty());

        editor.save_template().await.unwrap();

        assert!(!editor.is_dirty());
        assert_eq!(editor.baseline().session_name, "Push (deload)");
        assert_eq!(fixture.service.updated.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_template_rejected_for_freeform() {
        let fixture = Fixture::new(MockRoutineService::default());
        let mut editor = fixture.open("custom").await;

        let err = editor.save_template().await.unwrap_err();
        assert!(err.is_invalid_state());
        assert!(fixture.service.updated.lock().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_edit_is_discarded_when_journal_write_fails() {
        let temp_dir = TempDir::new().unwrap();
        // A regular file where the journal directory should be
        let blocker = temp_dir.path().join("blocked");
        std::fs::write(&blocker, "").unwrap();
        let store = Arc::new(FileJournalStore::new(&blocker, "journal"));

        let fixture = Fixture::new(MockRoutineService::default());
        let session = Session::freeform("자유 운동");
        let resolved = ResolvedSession {
            baseline: Baseline::freeze(&session),
            session,
        };
        let mut editor = WorkoutEditor::new(
            resolved,
            SessionMutator::new(fixture.clock.clone(), None),
            PersistenceSync::new(store),
            fixture.service.clone(),
        );

        let err = editor.add_exercise(3, "Bench press").unwrap_err();

        assert!(err.is_io());
        assert!(editor.session().exercises.is_empty());
        assert!(editor.session().save_date.is_none());
    }
}
