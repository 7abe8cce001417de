pub mod context;
pub mod journal;
pub mod session;
