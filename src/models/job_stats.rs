//! Aggregate statistics over a job collection.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::JobRecord;

/// Summary statistics for a set of jobs.
///
/// Recomputed from scratch on every request; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StatsReport {
    /// Number of jobs analyzed
    pub total_jobs: usize,
    /// Sum of all durations, rounded to 2 decimals
    pub total_minutes: f64,
    /// Mean duration, rounded to 2 decimals
    pub avg_minutes: f64,
    /// First job with the maximum duration
    pub longest_job: Option<JobRecord>,
    /// First job with the minimum duration
    pub shortest_job: Option<JobRecord>,
    /// Job count per technician (`Unknown` when blank)
    pub jobs_per_tech: BTreeMap<String, usize>,
    /// Job count per address (`Unknown` when blank)
    pub jobs_per_address: BTreeMap<String, usize>,
    /// Job count per `YYYY-MM-DD` start date
    pub jobs_per_day: BTreeMap<String, usize>,
    /// Jobs whose signal text matches the bad-signal vocabulary
    pub bad_signal_count: usize,
    /// Share of bad-signal jobs in percent, rounded to 2 decimals
    pub bad_signal_percent: f64,
    /// Most frequent issue; absent when there are no jobs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_common_issue: Option<String>,
}
