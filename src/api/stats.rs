//! Stats endpoint.

use actix_web::{HttpResponse, get, web};

use crate::db::JobStore;
use crate::models::StatsReport;
use crate::services::compute_stats;

/// Aggregate statistics over every stored job.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Stats computed over the local store", body = StatsReport)
    )
)]
#[get("/stats")]
pub async fn get_stats(store: web::Data<JobStore>) -> HttpResponse {
    let jobs = store.load_all().await;
    HttpResponse::Ok().json(compute_stats(&jobs))
}

/// Configure stats routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(get_stats);
}
