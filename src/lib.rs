//! Field Tools library.
//!
//! Job record model, the JSON job store, stats engine, Google Sheets sync,
//! report exporters, the REST API, and the interactive job form.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod form;
pub mod middleware;
pub mod models;
pub mod services;
