use anyhow::Result;
use liftlog_core::config::LiftlogConfig;
use liftlog_core::journal::JournalStore;
use liftlog_infrastructure::{ConfigService, FileJournalStore, HttpRoutineService};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration and backends shared by every command.
pub struct AppContext {
    pub config: LiftlogConfig,
    pub journal: Arc<dyn JournalStore>,
}

impl AppContext {
    /// Loads the configuration and opens the journal.
    ///
    /// `journal_dir` beats the configured directory, which beats the platform
    /// data directory.
    pub fn load(config_path: Option<PathBuf>, journal_dir: Option<PathBuf>) -> Result<Self> {
        let config_service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new(),
        };
        let config = config_service.get_config();

        let store = match journal_dir.or_else(|| config.journal_dir.clone()) {
            Some(dir) => FileJournalStore::new(dir, &config.journal_key),
            None => FileJournalStore::default_location(&config.journal_key)?,
        };
        tracing::debug!("[AppContext] Journal at {}", store.path().display());

        Ok(Self {
            config,
            journal: Arc::new(store),
        })
    }

    pub fn routine_service(&self) -> Result<HttpRoutineService> {
        HttpRoutineService::from_config(&self.config)
    }
}
