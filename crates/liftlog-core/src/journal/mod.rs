//! Local session journal.
//!
//! - `record`: Persisted record (`JournalRecord`)
//! - `repository`: Storage interface (`JournalStore`)
//! - `reconciler`: Load-time cleanup (`reconcile`)

mod reconciler;
mod record;
mod repository;

pub use reconciler::{Reconciliation, reconcile};
pub use record::JournalRecord;
pub use repository::JournalStore;
