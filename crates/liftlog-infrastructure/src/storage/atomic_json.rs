//! Atomic JSON file operations.
//!
//! Provides a thin layer for replacing a JSON document on disk in one step.

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::JsonError(e)
    }
}

impl From<AtomicJsonError> for liftlog_core::LiftlogError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::IoError(io) => io.into(),
            AtomicJsonError::JsonError(json) => json.into(),
            AtomicJsonError::LockError(message) => Self::data_access(message),
        }
    }
}

/// A handle to a JSON file that is always replaced as a whole.
///
/// Provides:
/// - **Atomicity**: Writes go to a tmp file that is renamed over the target
/// - **Isolation**: An exclusive lock file guards concurrent writers
/// - **Durability**: Explicit fsync before rename
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic JSON file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the JSON file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Replaces the file with `data`.
    ///
    /// The document is written next to the target, synced, then renamed over
    /// it while the sibling `.lock` file is held. Missing parent directories
    /// are created.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        let (dir, tmp_path) = self.staging_paths()?;
        fs::create_dir_all(dir)?;
        let _guard = WriteGuard::acquire(self.path.with_extension("lock"))?;

        let payload = serde_json::to_vec(data)?;
        {
            let mut staged = File::create(&tmp_path)?;
            staged.write_all(&payload)?;
            staged.sync_all()?;
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Directory of the target and the hidden staging file inside it.
    fn staging_paths(&self) -> Result<(&Path, PathBuf), AtomicJsonError> {
        match (self.path.parent(), self.path.file_name()) {
            (Some(dir), Some(name)) => {
                let staged = dir.join(format!(".{}.tmp", name.to_string_lossy()));
                Ok((dir, staged))
            }
            _ => Err(AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Not a file path: {}", self.path.display()),
            ))),
        }
    }
}

/// Exclusive writer lock, released on drop.
///
/// The lock file stays on disk so every writer locks the same inode.
struct WriteGuard {
    file: File,
}

impl WriteGuard {
    fn acquire(path: PathBuf) -> Result<Self, AtomicJsonError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()
            .map_err(|e| AtomicJsonError::LockError(format!("{}: {}", path.display(), e)))?;
        Ok(Self { file })
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
