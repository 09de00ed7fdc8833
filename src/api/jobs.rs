//! Job API handlers.

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::db::JobStore;
use crate::error::{AppError, AppResult};
use crate::models::{CreateJobRequest, JobListResponse, SaveJobResponse};
use crate::services::{create_job as build_job, pdf_export};

/// List every stored job.
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Jobs",
    responses(
        (status = 200, description = "Stored jobs in insertion order", body = JobListResponse)
    )
)]
#[get("/jobs")]
pub async fn list_jobs(store: web::Data<JobStore>) -> HttpResponse {
    let jobs = store.load_all().await;
    HttpResponse::Ok().json(JobListResponse {
        count: jobs.len(),
        jobs,
    })
}

/// Log a new job.
///
/// All six fields are required and must be non-blank. The job is stamped
/// with the current time and appended to the local store.
#[utoipa::path(
    post,
    path = "/jobs",
    tag = "Jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 200, description = "Job saved", body = SaveJobResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 500, description = "Job could not be saved", body = crate::error::ErrorResponse),
    )
)]
#[post("/jobs")]
pub async fn create_job(
    store: web::Data<JobStore>,
    body: web::Json<CreateJobRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let job = build_job(
        &req.id,
        &req.address,
        &req.issue,
        &req.resolution,
        &req.signal,
        &req.tech_name,
    );
    store.append_one(&job).await?;

    info!("Job created via API: id={}, tech={}", job.id, job.tech_name);

    Ok(HttpResponse::Ok().json(SaveJobResponse { saved: true, job }))
}

/// Download a single-page PDF report for a job.
#[utoipa::path(
    get,
    path = "/jobs/{job_id}/pdf",
    tag = "Jobs",
    params(
        ("job_id" = String, Path, description = "Job ID")
    ),
    responses(
        (status = 200, description = "PDF report", body = Vec<u8>, content_type = "application/pdf"),
        (status = 404, description = "Job not found", body = crate::error::ErrorResponse),
    )
)]
#[get("/jobs/{job_id}/pdf")]
pub async fn job_pdf(
    store: web::Data<JobStore>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let job_id = path.into_inner();
    let job = store
        .find_by_id(&job_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Job {}", job_id)))?;

    let bytes = pdf_export::render_job_pdf(&job);
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(pdf_export::default_file_name(
            &job,
        ))],
    };

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(disposition)
        .body(bytes))
}

/// Configure job routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_jobs).service(create_job).service(job_pdf);
}
