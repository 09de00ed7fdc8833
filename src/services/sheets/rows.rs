//! Conversion between job records and spreadsheet rows.

use chrono::{NaiveDate, TimeDelta};
use serde_json::Value as JsonValue;

use crate::models::{JobRecord, coerce_duration, value_to_text};
use crate::services::TIME_FORMAT;

/// Largest serial accepted as a date (9999-12-31).
const MAX_DATE_SERIAL: f64 = 2_958_465.0;

/// Column order used when appending rows.
pub const SHEET_HEADERS: [&str; 9] = [
    "Tech",
    "ID",
    "Address",
    "Issue",
    "Resolution",
    "Signal",
    "Start Time",
    "End Time",
    "Duration(min)",
];

/// Canonical job fields a sheet column can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Tech,
    Id,
    Address,
    Issue,
    Resolution,
    Signal,
    StartTime,
    EndTime,
    Duration,
}

impl Column {
    /// Match a header cell, ignoring case, spacing, and punctuation.
    fn from_header(header: &str) -> Option<Self> {
        let key: String = header
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "tech" | "techname" | "technician" => Some(Self::Tech),
            "id" | "jobid" => Some(Self::Id),
            "address" => Some(Self::Address),
            "issue" => Some(Self::Issue),
            "resolution" => Some(Self::Resolution),
            "signal" => Some(Self::Signal),
            "starttime" | "start" => Some(Self::StartTime),
            "endtime" | "end" => Some(Self::EndTime),
            "durationmin" | "duration" | "durationminutes" => Some(Self::Duration),
            _ => None,
        }
    }
}

/// Build one row in [`SHEET_HEADERS`] order.
pub fn job_to_row(job: &JobRecord) -> Vec<JsonValue> {
    vec![
        JsonValue::from(job.tech_name.as_str()),
        JsonValue::from(job.id.as_str()),
        JsonValue::from(job.address.as_str()),
        JsonValue::from(job.issue.as_str()),
        JsonValue::from(job.resolution.as_str()),
        JsonValue::from(job.signal.as_str()),
        JsonValue::from(job.start_time.as_str()),
        JsonValue::from(job.end_time.as_str()),
        JsonValue::from(job.duration_minutes),
    ]
}

/// Turn a sheet's values grid into job records.
///
/// The first row is the header row. Unknown columns are ignored, missing
/// cells read as empty, rows with no content are skipped, and a duration
/// that does not parse becomes 0.0.
pub fn rows_to_jobs(values: &[Vec<JsonValue>]) -> Vec<JobRecord> {
    let Some((header, rows)) = values.split_first() else {
        return Vec::new();
    };

    let columns: Vec<Option<Column>> = header
        .iter()
        .map(|cell| Column::from_header(&value_to_text(cell)))
        .collect();

    rows.iter()
        .filter(|row| row.iter().any(|cell| !value_to_text(cell).is_empty()))
        .map(|row| {
            let mut job = JobRecord::default();
            for (column, cell) in columns.iter().zip(row.iter()) {
                let Some(column) = column else { continue };
                match column {
                    Column::Tech => job.tech_name = value_to_text(cell),
                    Column::Id => job.id = value_to_text(cell),
                    Column::Address => job.address = value_to_text(cell),
                    Column::Issue => job.issue = value_to_text(cell),
                    Column::Resolution => job.resolution = value_to_text(cell),
                    Column::Signal => job.signal = value_to_text(cell),
                    Column::StartTime => job.start_time = timestamp_text(cell),
                    Column::EndTime => job.end_time = timestamp_text(cell),
                    Column::Duration => job.duration_minutes = coerce_duration(cell),
                }
            }
            job
        })
        .collect()
}

/// Text of a timestamp cell. A bare number is a spreadsheet date serial
/// (days since 1899-12-30) and is rendered as `YYYY-MM-DD HH:MM`.
fn timestamp_text(cell: &JsonValue) -> String {
    match cell.as_f64() {
        Some(serial) => serial_to_timestamp(serial).unwrap_or_else(|| value_to_text(cell)),
        None => value_to_text(cell),
    }
}

fn serial_to_timestamp(serial: f64) -> Option<String> {
    if !serial.is_finite() || !(0.0..=MAX_DATE_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    let stamp = epoch.checked_add_signed(TimeDelta::try_seconds(seconds)?)?;
    Some(stamp.format(TIME_FORMAT).to_string())
}
