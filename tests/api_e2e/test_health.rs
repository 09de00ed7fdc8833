//! E2E tests: health endpoint.

use super::test_helpers::*;

#[actix_rt::test]
async fn test_health_ok() {
    let (_dir, store) = create_test_store();
    let app = create_test_app(&store).await;

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
}
