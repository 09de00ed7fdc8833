//! E2E tests: stats endpoint.

use serde_json::json;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_stats_empty_store() {
    let (_dir, store) = create_test_store();
    let app = create_test_app(&store).await;

    let (status, body) = get_json(&app, "/stats").await;

    assert_eq!(status, 200);
    assert_eq!(body["total_jobs"], 0);
    assert_eq!(body["avg_minutes"], 0.0);
    assert_eq!(body["jobs_per_tech"], json!({}));
    assert!(body["longest_job"].is_null());
    assert!(body.get("most_common_issue").is_none());
}

#[actix_rt::test]
async fn test_stats_after_creating_jobs() {
    let (_dir, store) = create_test_store();
    let app = create_test_app(&store).await;

    for (id, tech, issue, signal) in [
        ("1", "Jose", "No sync", "Poor"),
        ("2", "Jose", "No sync", "Good"),
        ("3", "Ana", "Outage", "weak -20dB"),
    ] {
        let (status, _) = post_job(&app, job_body(id, tech, issue, signal)).await;
        assert_eq!(status, 200);
    }

    let (status, body) = get_json(&app, "/stats").await;

    assert_eq!(status, 200);
    assert_eq!(body["total_jobs"], 3);
    assert_eq!(body["jobs_per_tech"], json!({ "Ana": 1, "Jose": 2 }));
    assert_eq!(body["jobs_per_address"], json!({ "12 Oak St": 3 }));
    assert_eq!(body["bad_signal_count"], 2);
    assert_eq!(body["bad_signal_percent"], 66.67);
    assert_eq!(body["most_common_issue"], "No sync");
    // All durations are zero, so the first job is both longest and shortest.
    assert_eq!(body["longest_job"]["id"], "1");
    assert_eq!(body["shortest_job"]["id"], "1");
}
