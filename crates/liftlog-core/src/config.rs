use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default storage slot holding the journal.
pub const DEFAULT_JOURNAL_KEY: &str = "freeform_workout_journal";

/// Placeholder title of a free-form session ("free workout").
pub const DEFAULT_FREEFORM_SESSION_NAME: &str = "자유 운동";

/// Root configuration, read from `config.toml`.
///
/// Every field has a default so a partial or missing file still yields a
/// usable configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LiftlogConfig {
    /// Base URL of the routine backend.
    pub api_base_url: String,
    /// Per-request timeout for the routine backend.
    pub request_timeout_secs: u64,
    /// Name of the storage slot that holds the journal.
    pub journal_key: String,
    /// Overrides the platform data directory for the journal.
    pub journal_dir: Option<PathBuf>,
    /// Placeholder title given to free-form sessions.
    pub freeform_session_name: String,
}

impl Default for LiftlogConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            journal_key: DEFAULT_JOURNAL_KEY.to_string(),
            journal_dir: None,
            freeform_session_name: DEFAULT_FREEFORM_SESSION_NAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LiftlogConfig =
            toml::from_str("api_base_url = \"https://gym.example\"\n").unwrap();
        assert_eq!(config.api_base_url, "https://gym.example");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.journal_key, DEFAULT_JOURNAL_KEY);
        assert_eq!(config.freeform_session_name, DEFAULT_FREEFORM_SESSION_NAME);
        assert!(config.journal_dir.is_none());
    }
}
