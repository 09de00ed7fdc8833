//! Interactive terminal form for logging jobs.
//!
//! A `FormSession` reads answers from any `BufRead` and writes prompts to any
//! `Write`, so the `job-form` binary drives it with stdin/stdout and tests
//! drive it with in-memory buffers. The last pulled job list lives in a
//! `JobCache` owned by the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::db::JobStore;
use crate::models::JobRecord;
use crate::services::report_text::{render_job_table, render_stats_summary};
use crate::services::{SheetSync, compute_stats, create_job, pdf_export};

/// Jobs most recently loaded for display, stats, and export.
#[derive(Debug, Default, Clone)]
pub struct JobCache {
    jobs: Vec<JobRecord>,
}

impl JobCache {
    /// Replace the cached collection.
    pub fn replace(&mut self, jobs: Vec<JobRecord>) {
        self.jobs = jobs;
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    /// Look up a row by its 1-based table number.
    pub fn row(&self, number: usize) -> Option<&JobRecord> {
        number.checked_sub(1).and_then(|idx| self.jobs.get(idx))
    }
}

/// Raw answers for one job entry.
#[derive(Debug, Clone, Default)]
pub struct JobForm {
    pub tech_name: String,
    pub id: String,
    pub address: String,
    pub issue: String,
    pub resolution: String,
    pub signal: String,
}

impl JobForm {
    /// Job ID, Address, and Issue are required; the rest may be blank.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() || self.address.trim().is_empty() || self.issue.trim().is_empty()
        {
            return Err("Job ID, Address, and Issue are required.".to_string());
        }
        Ok(())
    }
}

/// Result of saving one job from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Saved locally and pushed to the sheet.
    Synced(JobRecord),
    /// Saved locally; the sheet push failed or sync is unavailable.
    SavedLocally(JobRecord),
    /// The local save failed.
    NotSaved(String),
}

/// Menu entries.
const MENU: &str = "\
1) Save job + sync to Google Sheets
2) Refresh job list
3) Show stats
4) Export job to PDF
5) Quit";

/// One interactive session over an input and output stream.
pub struct FormSession<R, W> {
    store: JobStore,
    sync: SheetSync,
    cache: JobCache,
    input: R,
    output: W,
    last_tech: String,
}

impl<R: BufRead, W: Write> FormSession<R, W> {
    pub fn new(store: JobStore, sync: SheetSync, input: R, output: W) -> Self {
        FormSession {
            store,
            sync,
            cache: JobCache::default(),
            input,
            output,
            last_tech: String::new(),
        }
    }

    /// Current cache contents.
    pub fn cache(&self) -> &JobCache {
        &self.cache
    }

    /// Consume the session and hand back the output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user quits or input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Field Tools - Job Logger")?;
        if !self.sync.is_available() {
            writeln!(
                self.output,
                "Google Sheets sync is not configured; jobs are saved locally only."
            )?;
        }

        loop {
            writeln!(self.output, "\n{}", MENU)?;
            let Some(choice) = self.prompt("Choice")? else {
                return Ok(());
            };

            match choice.as_str() {
                "1" => self.new_job().await?,
                "2" => self.refresh().await?,
                "3" => self.show_stats().await?,
                "4" => self.export_selected()?,
                "5" | "q" | "quit" => return Ok(()),
                other => writeln!(self.output, "Unknown choice '{}'.", other)?,
            }
        }
    }

    /// Save a job locally, then push it to the sheet.
    pub async fn save_and_sync(&self, form: &JobForm) -> SaveOutcome {
        let job = create_job(
            &form.id,
            &form.address,
            &form.issue,
            &form.resolution,
            &form.signal,
            &form.tech_name,
        );

        if let Err(e) = self.store.append_one(&job).await {
            return SaveOutcome::NotSaved(e.to_string());
        }

        if self.sync.push_one(&job).await {
            SaveOutcome::Synced(job)
        } else {
            SaveOutcome::SavedLocally(job)
        }
    }

    /// Reload the cache: from the sheet when sync is available, otherwise
    /// from the local store.
    pub async fn reload_cache(&mut self) {
        let jobs = if self.sync.is_available() {
            self.sync.pull_all().await
        } else {
            self.store.load_all().await
        };
        self.cache.replace(jobs);
    }

    async fn new_job(&mut self) -> io::Result<()> {
        let tech_label = if self.last_tech.is_empty() {
            "Tech Name".to_string()
        } else {
            format!("Tech Name [{}]", self.last_tech)
        };

        let Some(tech) = self.prompt(&tech_label)? else {
            return Ok(());
        };
        let tech_name = if tech.is_empty() {
            self.last_tech.clone()
        } else {
            tech
        };

        let mut form = JobForm {
            tech_name,
            ..Default::default()
        };
        for (label, field) in [
            ("Job ID", &mut form.id),
            ("Address", &mut form.address),
            ("Issue", &mut form.issue),
            ("Resolution", &mut form.resolution),
            ("Signal", &mut form.signal),
        ] {
            match self.prompt(label)? {
                Some(answer) => *field = answer,
                None => return Ok(()),
            }
        }

        if let Err(msg) = form.validate() {
            writeln!(self.output, "Missing Data: {}", msg)?;
            return Ok(());
        }

        // Keep the tech so it need not be retyped for the next job.
        self.last_tech = form.tech_name.clone();

        match self.save_and_sync(&form).await {
            SaveOutcome::Synced(_) => {
                writeln!(self.output, "Success: job saved and synced to Google Sheets.")?
            }
            SaveOutcome::SavedLocally(_) => writeln!(
                self.output,
                "Partial Success: job saved locally, but Google Sheets sync failed.\n\
                 Check the log output for details."
            )?,
            SaveOutcome::NotSaved(err) => {
                writeln!(self.output, "Error: job was not saved ({}).", err)?;
                return Ok(());
            }
        }

        self.refresh().await
    }

    async fn refresh(&mut self) -> io::Result<()> {
        self.reload_cache().await;
        if self.cache.is_empty() {
            writeln!(self.output, "No jobs found.")?;
            return Ok(());
        }
        write!(self.output, "{}", render_job_table(self.cache.jobs()))
    }

    async fn show_stats(&mut self) -> io::Result<()> {
        if self.cache.is_empty() {
            self.reload_cache().await;
        }
        if self.cache.is_empty() {
            writeln!(self.output, "No jobs found to analyze.")?;
            return Ok(());
        }

        let stats = compute_stats(self.cache.jobs());
        writeln!(self.output, "{}", render_stats_summary(&stats))
    }

    fn export_selected(&mut self) -> io::Result<()> {
        if self.cache.is_empty() {
            writeln!(self.output, "No jobs loaded. Refresh the job list first.")?;
            return Ok(());
        }

        let Some(answer) = self.prompt("Row number")? else {
            return Ok(());
        };
        let job = match answer.parse::<usize>().ok().and_then(|n| self.cache.row(n)) {
            Some(job) => job.clone(),
            None => {
                writeln!(self.output, "Error: '{}' is not a row in the table.", answer)?;
                return Ok(());
            }
        };

        let default_name = pdf_export::default_file_name(&job);
        let Some(target) = self.prompt(&format!("Save as [{}]", default_name))? else {
            return Ok(());
        };
        let path = PathBuf::from(if target.is_empty() {
            default_name
        } else {
            target
        });

        match pdf_export::export_job_to_pdf(&job, &path) {
            Ok(()) => writeln!(self.output, "Job report saved to: {}", path.display()),
            Err(e) => {
                warn!("PDF export failed: {}", e);
                writeln!(self.output, "Error: {}", e)
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
