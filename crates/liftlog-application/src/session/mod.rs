//! Session application services.
//!
//! This module contains the use cases of the routine-execution screen:
//! loading the working session, editing it, and keeping the journal in sync.

mod editor;
mod resolver;
mod sync;

pub use editor::WorkoutEditor;
pub use resolver::{BaselineResolver, ResolvedSession};
pub use sync::PersistenceSync;
