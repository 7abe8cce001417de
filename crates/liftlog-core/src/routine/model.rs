use crate::session::{ExerciseTemplateId, FREEFORM_ROUTINE_ID};
use serde::{Deserialize, Serialize};

/// A routine template as served by the routine backend, with the sets
/// previously recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineTemplate {
    pub routine_id: String,
    pub routine_name: String,
    pub exercises: Vec<RoutineExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    pub exercise_template_id: ExerciseTemplateId,
    pub exercise_name: String,
    pub memo: String,
    pub sets: Vec<RoutineSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineSet {
    /// Rendering id supplied by the backend, if any
    pub record_id: Option<String>,
    pub weight: f64,
    pub reps: u32,
}

/// What the routine-execution screen was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParam {
    /// Ad-hoc session kept in the local journal.
    Freeform,
    /// A stored routine; `member_id` is set when a trainer opens a member's routine.
    Scheduled {
        routine_id: String,
        member_id: Option<String>,
    },
}

impl RouteParam {
    /// Interprets a route parameter.
    ///
    /// [`FREEFORM_ROUTINE_ID`] selects a free-form session, anything else is a
    /// routine id. Returns `None` for a blank parameter.
    pub fn parse(param: &str, member_id: Option<&str>) -> Option<Self> {
        let param = param.trim();
        if param.is_empty() {
            return None;
        }
        if param == FREEFORM_ROUTINE_ID {
            return Some(Self::Freeform);
        }
        Some(Self::Scheduled {
            routine_id: param.to_string(),
            member_id: member_id
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_route_param() {
        assert_eq!(RouteParam::parse("custom", None), Some(RouteParam::Freeform));
        assert_eq!(RouteParam::parse("  ", None), None);
        assert_eq!(
            RouteParam::parse("17", Some("")),
            Some(RouteParam::Scheduled {
                routine_id: "17".to_string(),
                member_id: None
            })
        );
        assert_eq!(
            RouteParam::parse("17", Some("204")),
            Some(RouteParam::Scheduled {
                routine_id: "17".to_string(),
                member_id: Some("204".to_string())
            })
        );
    }
}
