//! Local job storage backed by a JSON file.
//!
//! The file holds a single JSON array of job records. Reads never fail: a
//! missing, unreadable, or malformed file is treated as an empty collection.
//! Writes go to a sibling temporary file that is renamed over the target, so
//! a failed append leaves the previous contents in place.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::error::{AppError, AppResult};
use crate::models::JobRecord;

/// Append-only job store.
#[derive(Debug, Clone)]
pub struct JobStore {
    path: PathBuf,
}

impl JobStore {
    /// Create a store for the given file. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JobStore { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every stored job in insertion order.
    pub async fn load_all(&self) -> Vec<JobRecord> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                error!("Error reading {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match parse_jobs(&raw) {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Ignoring unreadable job file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Find the first job with the given id.
    pub async fn find_by_id(&self, id: &str) -> Option<JobRecord> {
        self.load_all().await.into_iter().find(|job| job.id == id)
    }

    /// Append one job and persist the full collection.
    ///
    /// Not safe against concurrent writers: two appends racing on the same
    /// file can lose one update.
    pub async fn append_one(&self, job: &JobRecord) -> AppResult<()> {
        let mut jobs = self.load_all().await;
        jobs.push(job.clone());

        if let Err(e) = self.write_all(&jobs).await {
            error!("Error writing {}: {}", self.path.display(), e);
            return Err(e);
        }

        info!("Saved job {} locally to {}", job.id, self.path.display());
        Ok(())
    }

    async fn write_all(&self, jobs: &[JobRecord]) -> AppResult<()> {
        let body = serde_json::to_vec_pretty(jobs)
            .map_err(|e| AppError::Storage(format!("Failed to encode jobs: {}", e)))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &body)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;

        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(AppError::Storage(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "jobs.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Decode the file body; anything other than a JSON array is rejected.
fn parse_jobs(raw: &[u8]) -> Result<Vec<JobRecord>, String> {
    let value: serde_json::Value = serde_json::from_slice(raw).map_err(|e| e.to_string())?;
    if !value.is_array() {
        return Err("top-level value is not an array".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}
