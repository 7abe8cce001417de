//! Initial session resolution.
//!
//! Decides where the working session of a screen comes from: the routine
//! backend for a scheduled routine, the local journal for a free-form day.

use super::sync::PersistenceSync;
use chrono::NaiveDate;
use liftlog_core::clock::Clock;
use liftlog_core::error::Result;
use liftlog_core::journal::{JournalRecord, JournalStore, reconcile};
use liftlog_core::routine::{RouteParam, RoutineService, RoutineTemplate};
use liftlog_core::session::{
    Baseline, ExerciseEntry, Session, SessionKind, SetEntry, new_record_id,
};
use liftlog_core::timestamp::DATE_FORMAT;
use std::sync::Arc;

/// A freshly loaded working session and its frozen snapshot.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub session: Session,
    pub baseline: Baseline,
}

impl ResolvedSession {
    fn new(session: Session) -> Self {
        let baseline = Baseline::freeze(&session);
        Self { session, baseline }
    }
}

/// Resolves the working session for a route.
pub struct BaselineResolver {
    routine_service: Arc<dyn RoutineService>,
    journal: Arc<dyn JournalStore>,
    sync: PersistenceSync,
    clock: Arc<dyn Clock>,
    placeholder_name: String,
}

impl BaselineResolver {
    /// Creates a resolver.
    ///
    /// # Arguments
    ///
    /// * `routine_service` - Backend serving routine templates
    /// * `journal` - Local journal, read directly and rewritten through [`PersistenceSync`]
    /// * `clock` - Source of "today" when no explicit date is given
    /// * `placeholder_name` - Default title of free-form sessions
    pub fn new(
        routine_service: Arc<dyn RoutineService>,
        journal: Arc<dyn JournalStore>,
        clock: Arc<dyn Clock>,
        placeholder_name: impl Into<String>,
    ) -> Self {
        let sync = PersistenceSync::new(journal.clone());
        Self {
            routine_service,
            journal,
            sync,
            clock,
            placeholder_name: placeholder_name.into(),
        }
    }

    /// Loads the session for `route`.
    ///
    /// # Errors
    ///
    /// - `LoadFailed` when a scheduled routine cannot be fetched. There is no
    ///   local fallback for scheduled routines.
    /// - Journal write errors when a reconciled free-form journal cannot be
    ///   written back.
    pub async fn resolve(
        &self,
        route: &RouteParam,
        explicit_date: Option<NaiveDate>,
    ) -> Result<ResolvedSession> {
        let session = match route {
            RouteParam::Scheduled {
                routine_id,
                member_id,
            } => {
                let template = self
                    .routine_service
                    .fetch_routine(routine_id, member_id.as_deref())
                    .await
                    .inspect_err(|e| {
                        tracing::error!(
                            "[BaselineResolver] Failed to load routine {}: {}",
                            routine_id,
                            e
                        );
                    })?;
                tracing::info!(
                    "[BaselineResolver] Loaded routine {} ({} exercises)",
                    template.routine_id,
                    template.exercises.len()
                );
                scheduled_session(template)
            }
            RouteParam::Freeform => self.resolve_freeform(explicit_date)?,
        };

        Ok(ResolvedSession::new(session))
    }

    fn resolve_freeform(&self, explicit_date: Option<NaiveDate>) -> Result<Session> {
        let reconciliation = reconcile(self.journal.read_all());
        if reconciliation.changed {
            tracing::info!(
                "[BaselineResolver] Journal cleaned: {} timestamps normalized, {} duplicates removed",
                reconciliation.normalized,
                reconciliation.duplicates_removed
            );
            self.sync.replace_all(&reconciliation.records)?;
        }

        let target = explicit_date.unwrap_or_else(|| self.clock.now().date());
        let day = target.format(DATE_FORMAT).to_string();

        match self.find_freeform(&reconciliation.records, &day) {
            Some(record) => {
                tracing::info!(
                    "[BaselineResolver] Resuming {} from the journal",
                    record.identity_key()
                );
                Ok(record.clone().into_session())
            }
            None => {
                tracing::debug!("[BaselineResolver] No journal entry for {}", day);
                Ok(Session::freeform(format!("{} {}", day, self.placeholder_name)))
            }
        }
    }

    /// Picks the journal record for `day`.
    ///
    /// A record the user renamed beats one still carrying the placeholder
    /// title; within each group the latest appended wins.
    fn find_freeform<'a>(
        &self,
        records: &'a [JournalRecord],
        day: &str,
    ) -> Option<&'a JournalRecord> {
        let same_day = records
            .iter()
            .rev()
            .filter(|record| record.kind == SessionKind::Freeform && record.day() == day);
        let mut fallback = None;
        for record in same_day {
            if record.session_name != self.placeholder_name {
                return Some(record);
            }
            if fallback.is_none() {
                fallback = Some(record);
            }
        }
        fallback
    }
}

/// Builds the working copy of a fetched routine.
///
/// Sets without an id get a synthetic one and an exercise without sets gets a
/// single zeroed set. The save date stays unset until the first edit.
fn scheduled_session(template: RoutineTemplate) -> Session {
    let exercises = template
        .exercises
        .into_iter()
        .map(|exercise| {
            let mut sets: Vec<SetEntry> = exercise
                .sets
                .into_iter()
                .enumerate()
                .map(|(index, set)| SetEntry {
                    set_number: index as u32 + 1,
                    weight: set.weight,
                    reps: set.reps,
                    completed: false,
                    record_id: set.record_id.unwrap_or_else(new_record_id),
                })
                .collect();
            if sets.is_empty() {
                sets.push(SetEntry::empty(1));
            }
            ExerciseEntry {
                exercise_template_id: exercise.exercise_template_id,
                exercise_name: exercise.exercise_name,
                memo: exercise.memo,
                sets,
            }
        })
        .collect();

    Session {
        kind: SessionKind::Scheduled,
        routine_template_id: template.routine_id,
        session_name: template.routine_name,
        save_date: None,
        memo: String::new(),
        exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use liftlog_core::LiftlogError;
    use liftlog_core::clock::FixedClock;
    use liftlog_core::routine::{RoutineExercise, RoutineSet};
    use liftlog_core::session::SessionMutator;
    use liftlog_infrastructure::MemoryJournalStore;
    use std::sync::Mutex;

    const PLACEHOLDER: &str = "자유 운동";

    struct MockRoutineService {
        template: Option<RoutineTemplate>,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockRoutineService {
        fn serving(template: Option<RoutineTemplate>) -> Self {
            Self {
                template,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl RoutineService for MockRoutineService {
        async fn fetch_routine(
            &self,
            routine_id: &str,
            member_id: Option<&str>,
        ) -> Result<RoutineTemplate> {
            self.requests
                .lock()
                .unwrap()
                .push((routine_id.to_string(), member_id.map(str::to_string)));
            self.template
                .clone()
                .ok_or_else(|| LiftlogError::load_failed("루틴 정보를 불러오지 못했습니다."))
        }

        async fn record_session(&self, _session: &Session) -> Result<()> {
            Ok(())
        }

        async fn update_routine(&self, _session: &Session) -> Result<()> {
            Ok(())
        }
    }

    fn clock() -> Arc<dyn Clock> {
        let now =
            NaiveDateTime::parse_from_str("2024-06-01 14:05:09", "%Y-%m-%d %H:%M:%S").unwrap();
        Arc::new(FixedClock(now))
    }

    fn template() -> RoutineTemplate {
        RoutineTemplate {
            routine_id: "12".to_string(),
            routine_name: "Leg day".to_string(),
            exercises: vec![
                RoutineExercise {
                    exercise_template_id: 7,
                    exercise_name: "Squat".to_string(),
                    memo: "belt".to_string(),
                    sets: vec![
                        RoutineSet {
                            record_id: Some("s-1".to_string()),
                            weight: 100.0,
                            reps: 5,
                        },
                        RoutineSet {
                            record_id: None,
                            weight: 110.0,
                            reps: 3,
                        },
                    ],
                },
                RoutineExercise {
                    exercise_template_id: 9,
                    exercise_name: "Lunge".to_string(),
                    memo: String::new(),
                    sets: Vec::new(),
                },
            ],
        }
    }

    fn record(save_date: &str, name: &str, exercises: usize) -> JournalRecord {
        let mut session = Session::freeform(name);
        session.save_date = Some(save_date.to_string());
        for i in 0..exercises {
            session
                .exercises
                .push(ExerciseEntry::new(i as i64 + 1, format!("exercise {i}")));
        }
        JournalRecord::from_session(&session).unwrap()
    }

    fn resolver(
        service: Arc<MockRoutineService>,
        store: Arc<MemoryJournalStore>,
    ) -> BaselineResolver {
        BaselineResolver::new(service, store, clock(), PLACEHOLDER)
    }

    #[tokio::test]
    async fn test_scheduled_routine_is_normalized() {
        let service = Arc::new(MockRoutineService::serving(Some(template())));
        let resolver = resolver(service.clone(), Arc::new(MemoryJournalStore::new()));

        let route = RouteParam::parse("12", Some("204")).unwrap();
        let resolved = resolver.resolve(&route, None).await.unwrap();
        let session = &resolved.session;

        assert_eq!(session.kind, SessionKind::Scheduled);
        assert_eq!(session.session_name, "Leg day");
        assert!(session.save_date.is_none());
        assert_eq!(session.exercises[0].sets[0].record_id, "s-1");
        assert!(!session.exercises[0].sets[1].record_id.is_empty());
        assert_eq!(session.exercises[0].sets[1].set_number, 2);
        assert_eq!(session.exercises[1].sets.len(), 1);
        assert_eq!(*resolved.baseline, resolved.session);

        let requests = service.requests.lock().unwrap();
        assert_eq!(requests[0], ("12".to_string(), Some("204".to_string())));
    }

    #[tokio::test]
    async fn test_scheduled_load_failure_has_no_fallback() {
        let service = Arc::new(MockRoutineService::serving(None));
        let store = Arc::new(MemoryJournalStore::new());
        let resolver = resolver(service, store.clone());

        let route = RouteParam::parse("12", None).unwrap();
        let err = resolver.resolve(&route, None).await.unwrap_err();

        assert!(err.is_load_failed());
        assert!(store.raw().is_none());
    }

    #[tokio::test]
    async fn test_freeform_without_journal_entry_is_synthesized() {
        let service = Arc::new(MockRoutineService::serving(None));
        let resolver = resolver(service, Arc::new(MemoryJournalStore::new()));

        let resolved = resolver.resolve(&RouteParam::Freeform, None).await.unwrap();

        assert!(resolved.session.is_freeform());
        assert_eq!(resolved.session.session_name, "2024-06-01 자유 운동");
        assert!(resolved.session.exercises.is_empty());
        assert!(resolved.session.save_date.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_journal_is_replaced_by_first_edit() {
        let store = Arc::new(MemoryJournalStore::with_raw("[{"));
        let service = Arc::new(MockRoutineService::serving(None));
        let resolver = resolver(service, store.clone());

        let resolved = resolver.resolve(&RouteParam::Freeform, None).await.unwrap();
        assert_eq!(resolved.session.session_name, "2024-06-01 자유 운동");
        assert!(resolved.session.exercises.is_empty());

        let mutator = SessionMutator::new(clock(), None);
        let edited = mutator
            .add_exercise(&resolved.session, 3, "Bench press")
            .unwrap();
        PersistenceSync::new(store.clone()).upsert(&edited).unwrap();

        let reread = MemoryJournalStore::with_raw(store.raw().unwrap()).read_all();
        assert_eq!(reread.len(), 1);
        assert_eq!(reread[0].exercises[0].exercise_template_id, 3);
    }

    #[tokio::test]
    async fn test_freeform_prefers_renamed_record_for_the_day() {
        let store = Arc::new(MemoryJournalStore::new());
        store
            .write_all(&[
                record("2024-05-31 09:00:00", "Yesterday", 1),
                record("2024-06-01 09:00:00", "Back and arms", 2),
                record("2024-06-01 19:00:00", PLACEHOLDER, 1),
            ])
            .unwrap();
        let service = Arc::new(MockRoutineService::serving(None));
        let resolver = resolver(service, store);

        let resolved = resolver.resolve(&RouteParam::Freeform, None).await.unwrap();

        assert_eq!(resolved.session.session_name, "Back and arms");
        assert_eq!(
            resolved.session.save_date.as_deref(),
            Some("2024-06-01 09:00:00")
        );
    }

    #[tokio::test]
    async fn test_freeform_uses_explicit_date_and_rewrites_dirty_journal() {
        let store = Arc::new(MemoryJournalStore::new());
        store
            .write_all(&[
                record("2024-05-20T08:15:00", PLACEHOLDER, 1),
                record("2024-05-20 08:15:00", PLACEHOLDER, 3),
            ])
            .unwrap();
        let service = Arc::new(MockRoutineService::serving(None));
        let resolver = resolver(service, store.clone());

        let date = NaiveDate::from_ymd_opt(2024, 5, 20);
        let resolved = resolver.resolve(&RouteParam::Freeform, date).await.unwrap();

        assert_eq!(resolved.session.exercises.len(), 3);
        let journal = store.read_all();
        assert_eq!(journal.len(), 1);
        assert_eq!(journal[0].save_date, "2024-05-20 08:15:00");
    }
}
