//! REST API E2E test suite.
//!
//! Drives the full route table against a job store in a temporary directory.
//!
//! Run with: cargo test --test api_e2e

mod test_helpers;

mod test_health;
mod test_pdf;
mod test_stats;
