//! Journal store trait.
//!
//! Defines the interface for the durable local journal.

use super::record::JournalRecord;
use crate::error::Result;

/// An abstract store for the local session journal.
///
/// The journal is one ordered list of records kept in a single named slot.
/// No partial-record operations exist: every change is a read-modify-write of
/// the whole list, executed synchronously.
///
/// # Implementation Notes
///
/// - `read_all` never fails. An absent or unparsable slot reads as an empty
///   journal; the corrupt payload is discarded by the next write.
/// - `write_all` replaces the whole slot in one write and propagates failures
///   (quota, permissions) unchanged.
pub trait JournalStore: Send + Sync {
    /// Returns every record in journal order.
    fn read_all(&self) -> Vec<JournalRecord>;

    /// Replaces the journal with `records`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Journal written
    /// - `Err(_)`: The slot could not be written
    fn write_all(&self, records: &[JournalRecord]) -> Result<()>;
}
