//! E2E tests: per-job PDF download.

use actix_web::test;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_job_pdf_download() {
    let (_dir, store) = create_test_store();
    let app = create_test_app(&store).await;
    post_job(&app, job_body("J-9", "Jose", "Outage", "Good")).await;

    let req = test::TestRequest::get().uri("/jobs/J-9/pdf").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let headers = resp.headers();
    assert_eq!(
        headers.get("Content-Type").unwrap().to_str().unwrap(),
        "application/pdf"
    );
    let disposition = headers
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("job_J-9_report.pdf"), "{}", disposition);

    let body = test::read_body(resp).await;
    assert!(body.starts_with(b"%PDF-1.4"));
    assert!(body.ends_with(b"%%EOF\n"));
}

#[actix_rt::test]
async fn test_job_pdf_unknown_id() {
    let (_dir, store) = create_test_store();
    let app = create_test_app(&store).await;

    let (status, body) = get_json(&app, "/jobs/missing/pdf").await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}
