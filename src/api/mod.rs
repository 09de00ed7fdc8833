//! API endpoint modules.

pub mod health;
pub mod jobs;
pub mod openapi;
pub mod stats;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use jobs::configure_routes as configure_job_routes;
pub use openapi::ApiDoc;
pub use stats::configure_routes as configure_stats_routes;

/// JSON body settings shared by every route.
///
/// Malformed or incomplete bodies are answered with the same
/// `INVALID_INPUT` error shape as handler-level validation.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into())
}

/// Register every API route.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .configure(configure_health_routes)
        .configure(configure_job_routes)
        .configure(configure_stats_routes);
}
