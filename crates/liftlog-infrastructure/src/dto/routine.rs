//! Routine backend wire DTOs (Anti-Corruption Layer).
//!
//! The backend speaks snake_case JSON wrapped in a `{success, vo, msg}`
//! envelope. Numeric set fields are sometimes sent as strings, blank when the
//! user never typed a value; those read as 0.

use liftlog_core::LiftlogError;
use liftlog_core::routine::{RoutineExercise, RoutineSet, RoutineTemplate};
use liftlog_core::session::{ExerciseEntry, Session, SetEntry};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ============================================================================
// Lenient field readers
// ============================================================================

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number.max(0.0) } else { 0.0 })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer).map(|n| n.round() as u32)
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// ============================================================================
// Envelope
// ============================================================================

/// `{success, vo, msg}` response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub vo: Option<T>,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Returns the payload of a successful response.
    ///
    /// A failed or empty response yields the backend's message, or `fallback`
    /// when it sent none.
    pub fn into_payload(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.vo) {
            (true, Some(vo)) => Ok(vo),
            _ => Err(self
                .msg
                .filter(|msg| !msg.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())),
        }
    }

    /// Checks a write response, which carries no payload.
    pub fn into_ack(self, fallback: &str) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self
                .msg
                .filter(|msg| !msg.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string()))
        }
    }
}

// ============================================================================
// Routine read DTOs
// ============================================================================

/// `vo` of `GET /routine/{id}` and `GET /routine/trainer/{id}/{memberId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutineListDto {
    #[serde(default, deserialize_with = "lenient_id")]
    pub routine_list_idx: Option<String>,
    #[serde(default)]
    pub routine_name: String,
    #[serde(default)]
    pub routines: Vec<RoutineDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutineDto {
    pub pt_idx: i64,
    #[serde(default)]
    pub routine_memo: Option<String>,
    #[serde(default)]
    pub pt: Option<PtDto>,
    #[serde(default)]
    pub sets: Vec<RoutineSetDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PtDto {
    #[serde(default)]
    pub pt_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutineSetDto {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub set_volume: f64,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub set_count: u32,
}

impl RoutineListDto {
    /// Converts to the domain template; `requested_id` is used when the
    /// backend omits the routine id.
    pub fn into_domain(self, requested_id: &str) -> RoutineTemplate {
        RoutineTemplate {
            routine_id: self
                .routine_list_idx
                .unwrap_or_else(|| requested_id.to_string()),
            routine_name: self.routine_name,
            exercises: self.routines.into_iter().map(RoutineDto::into_domain).collect(),
        }
    }
}

impl RoutineDto {
    fn into_domain(self) -> RoutineExercise {
        RoutineExercise {
            exercise_template_id: self.pt_idx,
            exercise_name: self.pt.map(|pt| pt.pt_name).unwrap_or_default(),
            memo: self.routine_memo.unwrap_or_default(),
            sets: self
                .sets
                .into_iter()
                .map(|set| RoutineSet {
                    record_id: set.id,
                    weight: set.set_volume,
                    reps: set.set_count,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Write DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmittedSetDto {
    pub set_num: u32,
    pub set_volume: f64,
    pub set_count: u32,
    /// Present only on completed sets; the backend tests for the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
}

impl SubmittedSetDto {
    fn from_domain(set: &SetEntry, with_checks: bool) -> Self {
        Self {
            set_num: set.set_number,
            set_volume: set.weight,
            set_count: set.reps,
            checked: (with_checks && set.completed).then_some(true),
        }
    }
}

/// Body of `POST /routine/record`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRequestDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine_list_idx: Option<i64>,
    pub routine_name: String,
    pub save_date: Option<String>,
    pub routines: Vec<RecordRoutineDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRoutineDto {
    pub pt_idx: i64,
    pub routine_name: String,
    pub routine_memo: String,
    pub sets: Vec<SubmittedSetDto>,
}

impl RecordRequestDto {
    pub fn from_domain(session: &Session) -> Self {
        let routine_list_idx = if session.is_freeform() {
            None
        } else {
            session.routine_template_id.parse().ok()
        };
        Self {
            routine_list_idx,
            routine_name: session.session_name.clone(),
            save_date: session.save_date.clone(),
            routines: session
                .exercises
                .iter()
                .map(|entry| RecordRoutineDto {
                    pt_idx: entry.exercise_template_id,
                    routine_name: session.session_name.clone(),
                    routine_memo: entry.memo.clone(),
                    sets: entry
                        .sets
                        .iter()
                        .map(|set| SubmittedSetDto::from_domain(set, true))
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Body of `PUT /routine/update/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRoutineDto {
    pub routine_list_idx: i64,
    pub routine_name: String,
    pub routines: Vec<UpdateRoutineEntryDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateRoutineEntryDto {
    pub pt_idx: i64,
    pub routine_memo: String,
    pub sets: Vec<SubmittedSetDto>,
}

impl UpdateRoutineDto {
    /// Builds the update body; fails for sessions without a numeric routine id.
    pub fn from_domain(session: &Session) -> Result<Self, LiftlogError> {
        if session.is_freeform() {
            return Err(LiftlogError::remote(
                "free-form sessions have no routine template to update",
            ));
        }
        let routine_list_idx = session.routine_template_id.parse().map_err(|_| {
            LiftlogError::remote(format!(
                "routine id '{}' is not numeric",
                session.routine_template_id
            ))
        })?;
        Ok(Self {
            routine_list_idx,
            routine_name: session.session_name.clone(),
            routines: session.exercises.iter().map(UpdateRoutineEntryDto::from).collect(),
        })
    }
}

impl From<&ExerciseEntry> for UpdateRoutineEntryDto {
    fn from(entry: &ExerciseEntry) -> Self {
        Self {
            pt_idx: entry.exercise_template_id,
            routine_memo: entry.memo.clone(),
            sets: entry
                .sets
                .iter()
                .map(|set| SubmittedSetDto::from_domain(set, false))
                .collect(),
        }
    }
}
