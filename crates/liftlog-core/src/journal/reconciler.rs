//! Journal cleanup pass.
//!
//! Runs on load: timestamps are folded into the canonical format and records
//! sharing an [`IdentityKey`] are collapsed into one. Running the pass on its
//! own output changes nothing.

use super::record::JournalRecord;
use crate::session::IdentityKey;
use crate::timestamp::{is_canonical, normalize_timestamp};
use std::collections::HashMap;

/// Outcome of a reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Cleaned journal, one record per identity key
    pub records: Vec<JournalRecord>,
    /// True when `records` differs from the input and must be written back
    pub changed: bool,
    /// Number of save dates rewritten to the canonical format
    pub normalized: usize,
    /// Number of records dropped as duplicates
    pub duplicates_removed: usize,
}

/// Cleans a raw journal.
///
/// Within a group of records sharing a key, the one with more exercises is
/// kept; on a tie the most recently appended one wins. Each surviving record
/// stays at the position where its key first appeared.
pub fn reconcile(raw: Vec<JournalRecord>) -> Reconciliation {
    let original = raw.clone();
    let mut normalized = 0;
    let mut duplicates_removed = 0;

    let mut records: Vec<JournalRecord> = Vec::with_capacity(raw.len());
    let mut slots: HashMap<IdentityKey, usize> = HashMap::new();

    for mut record in raw {
        if !is_canonical(&record.save_date) {
            if let Some(canonical) = normalize_timestamp(&record.save_date) {
                record.save_date = canonical;
                normalized += 1;
            }
        }

        let key = record.identity_key();
        match slots.get(&key) {
            Some(&slot) => {
                duplicates_removed += 1;
                if record.exercises.len() >= records[slot].exercises.len() {
                    records[slot] = record;
                }
            }
            None => {
                slots.insert(key, records.len());
                records.push(record);
            }
        }
    }

    let changed = records != original;
    if changed {
        tracing::debug!(
            "[JournalReconciler] normalized={}, duplicates_removed={}, kept={}",
            normalized,
            duplicates_removed,
            records.len()
        );
    }

    Reconciliation {
        records,
        changed,
        normalized,
        duplicates_removed,
    }
}
