//! Sync tests using a pre-issued bearer token.

use field_tools_lib::services::{SheetSync, compute_stats};
use serde_json::json;

use super::mock_sheets_provider::MockSheetsProvider;
use super::test_helpers::*;

#[actix_rt::test]
async fn test_push_then_pull_round_trip() {
    let mock = MockSheetsProvider::start().await;
    let sync = SheetSync::from_settings(&valid_settings(&mock));
    assert!(sync.is_available());

    let job = sample_job("J-100");
    assert!(sync.push_one(&job).await);

    let rows = mock.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], json!("Jose"));
    assert_eq!(rows[0][1], json!("J-100"));

    let pulled = sync.pull_all().await;
    assert_eq!(pulled, vec![job]);
}

#[actix_rt::test]
async fn test_requests_target_quoted_worksheet() {
    let mock = MockSheetsProvider::start().await;
    let sync = SheetSync::from_settings(&valid_settings(&mock));

    assert!(sync.push_one(&sample_job("J-1")).await);
    sync.pull_all().await;

    let ranges = mock.ranges();
    assert_eq!(
        ranges,
        vec![
            format!("'{}':append", TEST_SHEET_NAME),
            format!("'{}'", TEST_SHEET_NAME)
        ]
    );
}

#[actix_rt::test]
async fn test_pull_maps_seeded_rows() {
    let mock = MockSheetsProvider::start().await;
    mock.seed_rows(vec![
        vec![
            json!("Ana"),
            json!(7),
            json!("9 Elm"),
            json!("Outage"),
            json!("Reset"),
            json!("Good"),
            json!("2024-05-01 09:00"),
            json!("2024-05-01 09:45"),
            json!(45),
        ],
        vec![json!(""), json!("")],
        vec![json!("Ben"), json!("8"), json!("3 Pine")],
    ]);

    let sync = SheetSync::from_settings(&valid_settings(&mock));
    let jobs = sync.pull_all().await;

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].id, "7");
    assert_eq!(jobs[0].tech_name, "Ana");
    assert_eq!(jobs[0].duration_minutes, 45.0);
    assert_eq!(jobs[1].address, "3 Pine");
    assert_eq!(jobs[1].issue, "");
    assert_eq!(jobs[1].duration_minutes, 0.0);
}

#[actix_rt::test]
async fn test_rejected_token_fails_softly() {
    let mock = MockSheetsProvider::start().await;
    let sync = SheetSync::from_settings(&static_token_settings(&mock, "wrong-token"));
    assert!(sync.is_available());

    assert!(!sync.push_one(&sample_job("J-2")).await);
    assert!(sync.pull_all().await.is_empty());
    assert!(mock.rows().is_empty());
}

#[actix_rt::test]
async fn test_server_error_fails_softly() {
    let mock = MockSheetsProvider::start().await;
    mock.set_fail_values(true);
    let sync = SheetSync::from_settings(&valid_settings(&mock));

    assert!(!sync.push_one(&sample_job("J-3")).await);
    assert!(sync.pull_all().await.is_empty());
}

#[actix_rt::test]
async fn test_pull_reads_cells_as_displayed() {
    let mock = MockSheetsProvider::start().await;
    let stored = vec![
        json!("Jose"),
        json!(123),
        json!("567 D St"),
        json!("Low Light"),
        json!("Replaced bulb"),
        json!("Good"),
        json!(45978.666666666664),
        json!(45978.6875),
        json!(30),
    ];
    let displayed = vec![
        json!("Jose"),
        json!("00123"),
        json!("567 D St"),
        json!("Low Light"),
        json!("Replaced bulb"),
        json!("Good"),
        json!("2025-11-17 16:00"),
        json!("2025-11-17 16:30"),
        json!("30"),
    ];
    mock.seed_displayed_rows(vec![stored], vec![displayed]);

    let sync = SheetSync::from_settings(&valid_settings(&mock));
    let jobs = sync.pull_all().await;

    assert_eq!(mock.render_options(), vec!["FORMATTED_VALUE".to_string()]);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "00123");
    assert_eq!(jobs[0].start_time, "2025-11-17 16:00");
    assert_eq!(jobs[0].end_time, "2025-11-17 16:30");
    assert_eq!(jobs[0].duration_minutes, 30.0);

    let stats = compute_stats(&jobs);
    assert_eq!(stats.jobs_per_day.get("2025-11-17"), Some(&1));
}
