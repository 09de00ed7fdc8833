//! Google Sheets sync test suite.
//!
//! Runs `SheetSync` against an in-process mock of the Sheets values API and
//! the OAuth token endpoint. No network access or real credentials needed.
//!
//! Run with: cargo test --test sheet_sync

mod mock_sheets_provider;

mod test_service_account;
mod test_static_token;
mod test_unavailable;
