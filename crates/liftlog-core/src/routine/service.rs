//! Routine backend interface.

use super::model::RoutineTemplate;
use crate::error::Result;
use crate::session::Session;
use async_trait::async_trait;

/// Remote source of routine templates and sink for finished workouts.
///
/// # Errors
///
/// - `fetch_routine` fails with [`LiftlogError::LoadFailed`] when the backend is
///   unreachable or answers `success=false`; the message is user-facing.
/// - Write operations fail with [`LiftlogError::Remote`].
///
/// [`LiftlogError::LoadFailed`]: crate::LiftlogError::LoadFailed
/// [`LiftlogError::Remote`]: crate::LiftlogError::Remote
#[async_trait]
pub trait RoutineService: Send + Sync {
    /// Fetches a routine template with its recorded sets.
    ///
    /// With `member_id`, the trainer view of that member's routine is loaded.
    async fn fetch_routine(
        &self,
        routine_id: &str,
        member_id: Option<&str>,
    ) -> Result<RoutineTemplate>;

    /// Records a performed workout.
    async fn record_session(&self, session: &Session) -> Result<()>;

    /// Stores edits made to a scheduled session back into its template.
    async fn update_routine(&self, session: &Session) -> Result<()>;
}
