//! Builds normalized job records from raw form/API input.

use chrono::{Local, NaiveDateTime};

use crate::models::JobRecord;

/// Timestamp layout shared with the spreadsheet (`2025-11-17 16:05`).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Create a job stamped with the current local time.
///
/// Start and end are the same instant and the duration is zero; elapsed
/// time is not tracked yet.
pub fn create_job(
    id: &str,
    address: &str,
    issue: &str,
    resolution: &str,
    signal: &str,
    tech_name: &str,
) -> JobRecord {
    create_job_at(
        id,
        address,
        issue,
        resolution,
        signal,
        tech_name,
        Local::now().naive_local(),
    )
}

/// Same as [`create_job`] with an explicit clock reading.
pub fn create_job_at(
    id: &str,
    address: &str,
    issue: &str,
    resolution: &str,
    signal: &str,
    tech_name: &str,
    now: NaiveDateTime,
) -> JobRecord {
    let stamp = now.format(TIME_FORMAT).to_string();

    JobRecord {
        id: id.trim().to_string(),
        address: address.trim().to_string(),
        issue: issue.trim().to_string(),
        resolution: resolution.trim().to_string(),
        signal: signal.trim().to_string(),
        tech_name: tech_name.trim().to_string(),
        start_time: stamp.clone(),
        end_time: stamp,
        duration_minutes: 0.0,
    }
}
