//! Routine templates served by the backend.

mod model;
mod service;

pub use model::{RouteParam, RoutineExercise, RoutineSet, RoutineTemplate};
pub use service::RoutineService;
