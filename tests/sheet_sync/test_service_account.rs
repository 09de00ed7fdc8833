//! Sync tests using a service-account key and the token exchange.

use field_tools_lib::services::SheetSync;

use super::mock_sheets_provider::MockSheetsProvider;
use super::test_helpers::*;

#[actix_rt::test]
async fn test_service_account_token_is_exchanged_once() {
    let mock = MockSheetsProvider::start().await;
    let dir = tempfile::tempdir().unwrap();
    let key_file = write_service_account_key(&dir, &mock.token_uri());

    let sync = SheetSync::from_settings(&service_account_settings(&mock, key_file));
    assert!(sync.is_available());

    assert!(sync.push_one(&sample_job("SA-1")).await);
    assert!(sync.push_one(&sample_job("SA-2")).await);
    let jobs = sync.pull_all().await;

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[1].id, "SA-2");
    // Cached token reused for every call.
    assert_eq!(mock.token_requests(), 1);
}

#[actix_rt::test]
async fn test_invalid_key_file_disables_sync() {
    let mock = MockSheetsProvider::start().await;
    let dir = tempfile::tempdir().unwrap();
    let key_file = dir.path().join("service_account.json");
    std::fs::write(&key_file, b"{\"client_email\": 42}").unwrap();

    let sync = SheetSync::from_settings(&service_account_settings(&mock, key_file));
    assert!(!sync.is_available());
}

#[actix_rt::test]
async fn test_unusable_private_key_fails_softly() {
    let mock = MockSheetsProvider::start().await;
    let dir = tempfile::tempdir().unwrap();
    let key_file = dir.path().join("service_account.json");
    std::fs::write(
        &key_file,
        serde_json::to_vec(&serde_json::json!({
            "client_email": "x@test.iam.gserviceaccount.com",
            "private_key": "not a pem",
            "token_uri": mock.token_uri(),
        }))
        .unwrap(),
    )
    .unwrap();

    let sync = SheetSync::from_settings(&service_account_settings(&mock, key_file));
    assert!(sync.is_available());
    assert!(!sync.push_one(&sample_job("SA-3")).await);
    assert_eq!(mock.token_requests(), 0);
}
