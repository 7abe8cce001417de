pub mod config_service;
pub mod dto;
pub mod file_journal_store;
pub mod http_routine_service;
pub mod memory_journal_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::file_journal_store::FileJournalStore;
pub use crate::http_routine_service::HttpRoutineService;
pub use crate::memory_journal_store::MemoryJournalStore;
pub use crate::paths::LiftlogPaths;
