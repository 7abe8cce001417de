//! Wire and storage DTOs.

pub mod routine;

pub use routine::{
    ApiEnvelope, RecordRequestDto, RoutineListDto, SubmittedSetDto, UpdateRoutineDto,
};
