//! Business logic services.

pub mod job_factory;
pub mod pdf_export;
pub mod report_text;
pub mod sheets;
pub mod stats;

pub use job_factory::{TIME_FORMAT, create_job, create_job_at};
pub use sheets::SheetSync;
pub use stats::compute_stats;
