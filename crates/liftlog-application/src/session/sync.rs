//! Journal persistence for the working session.
//!
//! `PersistenceSync` is the only writer of the journal. Everything else reads
//! through [`JournalStore::read_all`].

use liftlog_core::error::Result;
use liftlog_core::journal::{JournalRecord, JournalStore};
use liftlog_core::session::{IdentityKey, Session, SessionKind};
use std::sync::Arc;

/// Upserts sessions into the journal under their identity key.
#[derive(Clone)]
pub struct PersistenceSync {
    store: Arc<dyn JournalStore>,
}

impl PersistenceSync {
    pub fn new(store: Arc<dyn JournalStore>) -> Self {
        Self { store }
    }

    /// Writes `session` to the journal, replacing any record with the same key.
    ///
    /// Free-form records move to the end of the journal. Scheduled records keep
    /// the position of the first matching record, and later duplicates of the
    /// key are dropped, so one routine accumulates one record per day.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(key))`: Record written under `key`
    /// - `Ok(None)`: Session was never edited (no save date), nothing written
    /// - `Err(_)`: The journal could not be written
    pub fn upsert(&self, session: &Session) -> Result<Option<IdentityKey>> {
        let Some(record) = JournalRecord::from_session(session) else {
            tracing::debug!("[PersistenceSync] Skipping untouched session");
            return Ok(None);
        };
        let key = record.identity_key();

        let mut records = self.store.read_all();
        match record.kind {
            SessionKind::Freeform => {
                records.retain(|existing| existing.identity_key() != key);
                records.push(record);
            }
            SessionKind::Scheduled => {
                match records
                    .iter()
                    .position(|existing| existing.identity_key() == key)
                {
                    Some(position) => {
                        let mut index = 0;
                        records.retain(|existing| {
                            let keep = index <= position || existing.identity_key() != key;
                            index += 1;
                            keep
                        });
                        records[position] = record;
                    }
                    None => records.push(record),
                }
            }
        }

        self.store.write_all(&records)?;
        tracing::debug!(
            "[PersistenceSync] Upserted {} ({} records)",
            key,
            records.len()
        );
        Ok(Some(key))
    }

    /// Drops every record stored under `key`.
    ///
    /// Returns whether anything was removed. The journal is only written when
    /// it changed.
    pub fn remove(&self, key: &IdentityKey) -> Result<bool> {
        let mut records = self.store.read_all();
        let before = records.len();
        records.retain(|existing| existing.identity_key() != *key);
        if records.len() == before {
            return Ok(false);
        }

        self.store.write_all(&records)?;
        tracing::debug!("[PersistenceSync] Removed {}", key);
        Ok(true)
    }

    /// Replaces the whole journal, e.g. with a reconciled copy.
    pub fn replace_all(&self, records: &[JournalRecord]) -> Result<()> {
        self.store.write_all(records)?;
        tracing::debug!("[PersistenceSync] Rewrote journal ({} records)", records.len());
        Ok(())
    }
}
