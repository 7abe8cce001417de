//! In-memory JournalStore.
//!
//! Holds the serialized slot as a string, the way a browser key-value store
//! would, so tests exercise the same parse path as the file-backed store.

use liftlog_core::error::Result;
use liftlog_core::journal::{JournalRecord, JournalStore};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryJournalStore {
    slot: Mutex<Option<String>>,
}

impl MemoryJournalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already holds `raw`, parsable or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    /// Returns the current raw slot content.
    pub fn raw(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl JournalStore for MemoryJournalStore {
    fn read_all(&self) -> Vec<JournalRecord> {
        let Some(raw) = self.raw() else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("[MemoryJournalStore] Malformed journal, treating as empty: {}", e);
            Vec::new()
        })
    }

    fn write_all(&self, records: &[JournalRecord]) -> Result<()> {
        let raw = serde_json::to_string(records)?;
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liftlog_core::session::Session;

    #[test]
    fn test_empty_and_malformed_slots_read_empty() {
        assert!(MemoryJournalStore::new().read_all().is_empty());
        assert!(MemoryJournalStore::with_raw("nope").read_all().is_empty());
        assert!(MemoryJournalStore::with_raw("{}").read_all().is_empty());
    }

    #[test]
    fn test_round_trip_through_slot() {
        let mut session = Session::freeform("자유 운동");
        session.save_date = Some("2024-06-01 10:00:00".to_string());
        let record = JournalRecord::from_session(&session).unwrap();

        let store = MemoryJournalStore::new();
        store.write_all(&[record.clone()]).unwrap();

        assert!(store.raw().unwrap().contains("\"saveDate\":\"2024-06-01 10:00:00\""));
        assert_eq!(store.read_all(), vec![record]);
    }
}
