//! Unified path management for liftlog files.
//!
//! Platform directories are resolved with the `dirs` crate so configuration
//! and journal data land in the usual places on Linux, macOS and Windows.

use std::path::PathBuf;

const APP_DIR: &str = "liftlog";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for liftlog.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/liftlog/           # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/liftlog/      # Data directory
/// └── journal/                 # Journal slots
///     └── freeform_workout_journal.json
/// ```
pub struct LiftlogPaths;

impl LiftlogPaths {
    /// Returns the liftlog configuration directory (e.g., `~/.config/liftlog/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the liftlog data directory (e.g., `~/.local/share/liftlog/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory holding journal slots.
    pub fn journal_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("journal"))
    }
}
