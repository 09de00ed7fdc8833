//! Domain models for Field Tools.

pub mod job;
pub mod job_stats;

// Re-export commonly used types
pub use job::{
    CreateJobRequest, JobListResponse, JobRecord, SaveJobResponse, coerce_duration,
    format_minutes, value_to_text,
};
pub use job_stats::StatsReport;
