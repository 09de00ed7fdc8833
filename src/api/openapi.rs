//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Field Tools API",
        version = "0.1.0",
        description = "Job tracking and analytics for field-service visits"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        // Job endpoints
        api::jobs::list_jobs,
        api::jobs::create_job,
        api::jobs::job_pdf,
        // Stats endpoints
        api::stats::get_stats,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            // Health
            api::health::HealthResponse,
            // Jobs
            models::JobRecord,
            models::CreateJobRequest,
            models::JobListResponse,
            models::SaveJobResponse,
            // Stats
            models::StatsReport,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Jobs", description = "Job logging and reports"),
        (name = "Stats", description = "Aggregate job analytics")
    )
)]
pub struct ApiDoc;
