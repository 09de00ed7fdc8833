//! Two-way sync with a Google Sheet.
//!
//! `SheetSync` appends single jobs as rows and pulls the whole worksheet back
//! as job records. Sync is optional: when no spreadsheet or credentials are
//! configured the client reports itself unavailable and every call is a
//! logged no-op that returns `false` or an empty collection.

pub mod auth;
pub mod rows;

use std::time::Duration;

use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{error, info, warn};

use crate::config::SheetSettings;
use crate::error::{AppError, AppResult};
use crate::models::JobRecord;

pub use auth::{ServiceAccountKey, TokenSource};
pub use rows::{SHEET_HEADERS, job_to_row, rows_to_jobs};

/// HTTP connect timeout for Sheets calls.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP total timeout for Sheets calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Values payload returned by `spreadsheets.values.get`.
#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

/// Connected spreadsheet target.
#[derive(Clone)]
struct SheetTarget {
    api_base_url: String,
    sheet_id: String,
    sheet_name: String,
    tokens: TokenSource,
}

/// Google Sheets sync client.
#[derive(Clone)]
pub struct SheetSync {
    target: Option<SheetTarget>,
    http_client: reqwest::Client,
}

impl SheetSync {
    /// Build a sync client from settings. Never fails; problems with the
    /// settings are logged and leave the client unavailable.
    pub fn from_settings(settings: &SheetSettings) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client for Sheets: {}", e);
                reqwest::Client::new()
            });

        let target = match Self::resolve_target(settings) {
            Ok(target) => {
                info!(
                    "Google Sheets sync enabled (sheet_id={}, worksheet={})",
                    target.sheet_id, target.sheet_name
                );
                Some(target)
            }
            Err(reason) => {
                warn!("Google Sheets sync disabled: {}", reason);
                None
            }
        };

        SheetSync {
            target,
            http_client,
        }
    }

    /// A client that never syncs.
    pub fn disabled() -> Self {
        SheetSync {
            target: None,
            http_client: reqwest::Client::new(),
        }
    }

    fn resolve_target(settings: &SheetSettings) -> Result<SheetTarget, String> {
        let sheet_id = settings
            .sheet_id
            .clone()
            .ok_or_else(|| "FT_SHEET_ID is not set".to_string())?;

        let tokens = match settings.access_token {
            Some(ref token) => TokenSource::fixed(token.clone()),
            None => {
                let key = ServiceAccountKey::from_file(&settings.service_account_file)
                    .map_err(|e| e.to_string())?;
                TokenSource::service_account(key)
            }
        };

        Ok(SheetTarget {
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            sheet_id,
            sheet_name: settings.sheet_name.clone(),
            tokens,
        })
    }

    /// Whether a spreadsheet and credentials are configured.
    pub fn is_available(&self) -> bool {
        self.target.is_some()
    }

    /// Append one job as a row. Returns `true` on success.
    pub async fn push_one(&self, job: &JobRecord) -> bool {
        let Some(ref target) = self.target else {
            warn!("Google Sheets sync unavailable; job {} not pushed", job.id);
            return false;
        };

        match self.append_row(target, job).await {
            Ok(()) => {
                info!("Job {} synced to Google Sheets", job.id);
                true
            }
            Err(e) => {
                error!("Error syncing job {} to Google Sheets: {}", job.id, e);
                false
            }
        }
    }

    /// Pull every job row from the worksheet. Returns an empty collection
    /// when unavailable or on any error.
    ///
    /// Cells are read as displayed, so dates and zero-padded IDs keep the
    /// text shown in the sheet.
    pub async fn pull_all(&self) -> Vec<JobRecord> {
        let Some(ref target) = self.target else {
            warn!("Google Sheets sync unavailable; nothing pulled");
            return Vec::new();
        };

        match self.fetch_values(target).await {
            Ok(values) => {
                let jobs = rows_to_jobs(&values);
                info!("Loaded {} jobs from Google Sheets", jobs.len());
                jobs
            }
            Err(e) => {
                error!("Error loading from Google Sheets: {}", e);
                Vec::new()
            }
        }
    }

    async fn append_row(&self, target: &SheetTarget, job: &JobRecord) -> AppResult<()> {
        let token = target.tokens.access_token(&self.http_client).await?;
        let url = format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            target.values_url()
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(token.expose_secret())
            .json(&serde_json::json!({
                "majorDimension": "ROWS",
                "values": [job_to_row(job)],
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sync(format!(
                "append returned status {}: {}",
                status, body
            )));
        }
        Ok(())
    }

    async fn fetch_values(&self, target: &SheetTarget) -> AppResult<Vec<Vec<JsonValue>>> {
        let token = target.tokens.access_token(&self.http_client).await?;
        let url = format!(
            "{}?majorDimension=ROWS&valueRenderOption=FORMATTED_VALUE&dateTimeRenderOption=FORMATTED_STRING",
            target.values_url()
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sync(format!(
                "values.get returned status {}: {}",
                status, body
            )));
        }

        let range: ValueRange = response.json().await?;
        Ok(range.values)
    }
}

impl SheetTarget {
    /// `.../v4/spreadsheets/{id}/values/{'Sheet Name'}`
    fn values_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base_url,
            urlencoding::encode(&self.sheet_id),
            urlencoding::encode(&quote_sheet_name(&self.sheet_name))
        )
    }
}

/// Quote a worksheet name for A1 notation (`My 'Jobs'` → `'My ''Jobs'''`).
fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}
