//! Low-level file storage helpers.

mod atomic_json;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
