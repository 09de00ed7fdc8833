//! Shared test helpers for API E2E tests.

use actix_web::{App, dev::ServiceResponse, test, web};
use field_tools_lib::api;
use field_tools_lib::db::JobStore;
use field_tools_lib::middleware::RequestLogger;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Fresh job store in its own temporary directory. Keep the `TempDir`
/// alive for the duration of the test.
pub fn create_test_store() -> (TempDir, JobStore) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = JobStore::new(dir.path().join("jobs.json"));
    (dir, store)
}

/// Create a test app with every API route registered.
pub async fn create_test_app(
    store: &JobStore,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .wrap(RequestLogger)
            .app_data(web::Data::new(store.clone()))
            .configure(api::configure_routes),
    )
    .await
}

/// Valid job body with the given id and tech.
pub fn job_body(id: &str, tech: &str, issue: &str, signal: &str) -> Value {
    json!({
        "id": id,
        "address": "12 Oak St",
        "issue": issue,
        "resolution": "Reset ONT",
        "signal": signal,
        "tech_name": tech,
    })
}

/// POST a job body; returns status and JSON body.
pub async fn post_job<S>(app: &S, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/jobs")
        .set_json(body)
        .to_request();

    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a JSON endpoint; returns status and JSON body.
pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
