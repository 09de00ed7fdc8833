//! Sync behavior when no spreadsheet is configured.

use field_tools_lib::config::SheetSettings;
use field_tools_lib::services::SheetSync;

use super::test_helpers::sample_job;

#[actix_rt::test]
async fn test_missing_sheet_id_is_a_noop() {
    let sync = SheetSync::from_settings(&SheetSettings::disabled());

    assert!(!sync.is_available());
    assert!(!sync.push_one(&sample_job("N-1")).await);
    assert!(sync.pull_all().await.is_empty());
}

#[actix_rt::test]
async fn test_missing_key_file_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = SheetSettings::disabled();
    settings.sheet_id = Some("sheet".to_string());
    settings.service_account_file = dir.path().join("absent.json");

    let sync = SheetSync::from_settings(&settings);
    assert!(!sync.is_available());
    assert!(sync.pull_all().await.is_empty());
}
