//! Application layer for LiftLog.
//!
//! This crate provides use case implementations that coordinate between
//! domain and infrastructure layers.

pub mod session;

pub use session::{BaselineResolver, PersistenceSync, ResolvedSession, WorkoutEditor};
