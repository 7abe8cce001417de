pub mod clock;
pub mod config;
pub mod error;
pub mod journal;
pub mod routine;
pub mod session;
pub mod timestamp;

// Re-export common error type
pub use error::LiftlogError;
