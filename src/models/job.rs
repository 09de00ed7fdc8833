//! Job record model and request/response DTOs.
//!
//! `JobRecord` keeps one canonical field per value. The external JSON shape
//! carries two aliases (`tech` for `tech_name`, `duration` for
//! `duration_minutes`), written on serialization and accepted on input.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use utoipa::openapi::{RefOr, schema::Schema};
use utoipa::{PartialSchema, ToSchema};

use crate::error::{AppError, AppResult};

/// One logged field-service visit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobRecord {
    /// Caller-supplied job identifier.
    pub id: String,
    /// Customer address.
    pub address: String,
    /// Reported problem.
    pub issue: String,
    /// Resolution notes.
    pub resolution: String,
    /// Signal quality label (e.g. Good/Bad).
    pub signal: String,
    /// Technician name, may be empty. Also serialized as `tech`.
    pub tech_name: String,
    /// `YYYY-MM-DD HH:MM`
    pub start_time: String,
    /// `YYYY-MM-DD HH:MM`
    pub end_time: String,
    /// Duration in minutes. Also serialized as `duration`.
    pub duration_minutes: f64,
}

impl Serialize for JobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("JobRecord", 11)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("address", &self.address)?;
        state.serialize_field("issue", &self.issue)?;
        state.serialize_field("resolution", &self.resolution)?;
        state.serialize_field("signal", &self.signal)?;
        state.serialize_field("start_time", &self.start_time)?;
        state.serialize_field("end_time", &self.end_time)?;
        state.serialize_field("duration_minutes", &self.duration_minutes)?;
        state.serialize_field("duration", &self.duration_minutes)?;
        state.serialize_field("tech_name", &self.tech_name)?;
        state.serialize_field("tech", &self.tech_name)?;
        state.end()
    }
}

/// Documented JSON shape of a job, aliases included.
#[allow(dead_code)]
#[derive(ToSchema)]
struct JobRecordSchema {
    /// Caller-supplied job identifier.
    id: String,
    /// Customer address.
    address: String,
    /// Reported problem.
    issue: String,
    /// Resolution notes.
    resolution: String,
    /// Signal quality label (e.g. Good/Bad).
    signal: String,
    /// `YYYY-MM-DD HH:MM`
    start_time: String,
    /// `YYYY-MM-DD HH:MM`
    end_time: String,
    /// Duration in minutes.
    duration_minutes: f64,
    /// Same value as `duration_minutes`.
    duration: f64,
    /// Technician name, may be empty.
    tech_name: String,
    /// Same value as `tech_name`.
    tech: String,
}

impl PartialSchema for JobRecord {
    fn schema() -> RefOr<Schema> {
        JobRecordSchema::schema()
    }
}

impl ToSchema for JobRecord {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("JobRecord")
    }
}

impl<'de> Deserialize<'de> for JobRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JobRecordWire::deserialize(deserializer).map(JobRecord::from)
    }
}

/// Tolerant input shape: every key optional, aliases accepted.
#[derive(Deserialize)]
struct JobRecordWire {
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default)]
    address: Option<JsonValue>,
    #[serde(default)]
    issue: Option<JsonValue>,
    #[serde(default)]
    resolution: Option<JsonValue>,
    #[serde(default)]
    signal: Option<JsonValue>,
    #[serde(default)]
    tech_name: Option<JsonValue>,
    #[serde(default)]
    tech: Option<JsonValue>,
    #[serde(default)]
    start_time: Option<JsonValue>,
    #[serde(default)]
    end_time: Option<JsonValue>,
    #[serde(default)]
    duration_minutes: Option<JsonValue>,
    #[serde(default)]
    duration: Option<JsonValue>,
}

impl From<JobRecordWire> for JobRecord {
    fn from(wire: JobRecordWire) -> Self {
        let text = |v: &Option<JsonValue>| v.as_ref().map(value_to_text).unwrap_or_default();

        // Canonical key wins; an empty canonical value falls back to the alias.
        let tech_name = match text(&wire.tech_name) {
            t if t.is_empty() => text(&wire.tech),
            t => t,
        };
        let duration_minutes = wire
            .duration_minutes
            .as_ref()
            .filter(|v| !v.is_null())
            .or(wire.duration.as_ref())
            .map(coerce_duration)
            .unwrap_or(0.0);

        JobRecord {
            id: text(&wire.id),
            address: text(&wire.address),
            issue: text(&wire.issue),
            resolution: text(&wire.resolution),
            signal: text(&wire.signal),
            tech_name,
            start_time: text(&wire.start_time),
            end_time: text(&wire.end_time),
            duration_minutes,
        }
    }
}

/// Render a loosely-typed JSON scalar as trimmed text.
pub fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Coerce a loosely-typed duration to minutes; anything unusable becomes 0.0.
pub fn coerce_duration(value: &JsonValue) -> f64 {
    let parsed = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|d| d.is_finite()).unwrap_or(0.0)
}

/// Format minutes the way reports show them (`0.0`, `12.5`).
pub fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{:.1}", minutes)
    } else {
        format!("{}", minutes)
    }
}

/// Request body for `POST /jobs`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateJobRequest {
    /// Job ID
    pub id: String,
    /// Customer address
    pub address: String,
    /// Problem/issue
    pub issue: String,
    /// Resolution notes
    pub resolution: String,
    /// Signal quality label (e.g. Good/Bad)
    pub signal: String,
    /// Technician name
    pub tech_name: String,
}

impl CreateJobRequest {
    /// Every field is required and must be non-blank.
    pub fn validate(&self) -> AppResult<()> {
        let missing: Vec<&str> = [
            ("id", &self.id),
            ("address", &self.address),
            ("issue", &self.issue),
            ("resolution", &self.resolution),
            ("signal", &self.signal),
            ("tech_name", &self.tech_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidInput(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Response for `GET /jobs`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobListResponse {
    pub count: usize,
    pub jobs: Vec<JobRecord>,
}

/// Response for `POST /jobs`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveJobResponse {
    pub saved: bool,
    pub job: JobRecord,
}
