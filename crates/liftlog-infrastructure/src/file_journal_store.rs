//! File-backed JournalStore implementation.
//!
//! The journal slot is one JSON array on disk:
//!
//! ```text
//! journal_dir/
//! └── <journal_key>.json
//! ```

use crate::paths::LiftlogPaths;
use crate::storage::AtomicJsonFile;
use anyhow::Result;
use liftlog_core::error::Result as LiftlogResult;
use liftlog_core::journal::{JournalRecord, JournalStore};
use std::path::Path;

/// Journal stored as a JSON file named after its storage key.
pub struct FileJournalStore {
    file: AtomicJsonFile<Vec<JournalRecord>>,
}

impl FileJournalStore {
    /// Creates a store for `journal_key` at the default location
    /// (`~/.local/share/liftlog/journal`).
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be determined.
    pub fn default_location(journal_key: &str) -> Result<Self> {
        let journal_dir = LiftlogPaths::journal_dir()
            .map_err(|e| anyhow::anyhow!("Failed to get journal directory: {}", e))?;
        Ok(Self::new(journal_dir, journal_key))
    }

    /// Creates a store for `journal_key` inside `journal_dir`.
    ///
    /// The directory is created on first write.
    pub fn new(journal_dir: impl AsRef<Path>, journal_key: &str) -> Self {
        let path = journal_dir.as_ref().join(format!("{journal_key}.json"));
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Returns the journal file path.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl JournalStore for FileJournalStore {
    fn read_all(&self) -> Vec<JournalRecord> {
        match self.file.load() {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    "[FileJournalStore] Unreadable journal at {}, treating as empty: {}",
                    self.file.path().display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn write_all(&self, records: &[JournalRecord]) -> LiftlogResult<()> {
        self.file.save(&records.to_vec())?;
        tracing::debug!(
            "[FileJournalStore] Wrote {} records to {}",
            records.len(),
            self.file.path().display()
        );
        Ok(())
    }
}
