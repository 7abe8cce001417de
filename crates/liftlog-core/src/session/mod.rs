//! Session domain module.
//!
//! This module contains the workout-session model and the pure logic that
//! operates on it.
//!
//! # Module Structure
//!
//! - `model`: Working copy (`Session`) and frozen snapshot (`Baseline`)
//! - `identity`: "Same session" key (`IdentityKey`)
//! - `mutator`: Edit operations (`SessionMutator`)
//! - `dirty`: Unsaved-changes detection (`is_dirty`)
//!
//! # Usage
//!
//! ```ignore
//! use liftlog_core::session::{Session, Baseline, SessionMutator, is_dirty};
//! ```

mod dirty;
mod identity;
mod model;
mod mutator;

// Re-export public API
pub use dirty::is_dirty;
pub use identity::{IdentityKey, identity_key};
pub use model::{
    Baseline, ExerciseEntry, ExerciseTemplateId, FREEFORM_ROUTINE_ID, Session, SessionKind,
    SetEntry, new_record_id,
};
pub use mutator::{MutationError, SessionMutator, SetField};
