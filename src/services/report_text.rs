//! Plain-text rendering of job tables and stats summaries for the terminal.

use std::collections::BTreeMap;

use crate::models::{JobRecord, StatsReport, format_minutes};

/// Table columns: header and maximum width.
const COLUMNS: [(&str, usize); 7] = [
    ("#", 4),
    ("Job ID", 10),
    ("Address", 28),
    ("Issue", 24),
    ("Signal", 10),
    ("Duration (min)", 14),
    ("Tech", 16),
];

/// Render jobs as a fixed-width table. Row numbers start at 1.
pub fn render_job_table(jobs: &[JobRecord]) -> String {
    let mut out = String::new();
    let header: Vec<String> = COLUMNS.iter().map(|(name, _)| name.to_string()).collect();
    push_row(&mut out, &header);

    let rule: Vec<String> = COLUMNS.iter().map(|(_, width)| "-".repeat(*width)).collect();
    push_row(&mut out, &rule);

    for (idx, job) in jobs.iter().enumerate() {
        let cells = vec![
            (idx + 1).to_string(),
            job.id.clone(),
            job.address.clone(),
            job.issue.clone(),
            job.signal.clone(),
            format_minutes(job.duration_minutes),
            job.tech_name.clone(),
        ];
        push_row(&mut out, &cells);
    }
    out
}

fn push_row(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells
        .iter()
        .zip(COLUMNS.iter())
        .map(|(cell, (_, width))| format!("{:<width$}", truncate(cell, *width), width = *width))
        .collect();
    out.push_str(line.join(" ").trim_end());
    out.push('\n');
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

/// Human-readable stats summary.
pub fn render_stats_summary(stats: &StatsReport) -> String {
    let lines = [
        format!("Total jobs: {}", stats.total_jobs),
        format!("Total minutes: {}", format_minutes(stats.total_minutes)),
        format!("Average duration (min): {}", format_minutes(stats.avg_minutes)),
        String::new(),
        format!("Longest job: {}", job_label(stats.longest_job.as_ref())),
        format!("Shortest job: {}", job_label(stats.shortest_job.as_ref())),
        String::new(),
        format!(
            "Bad signal jobs: {} ({}%)",
            stats.bad_signal_count,
            format_minutes(stats.bad_signal_percent)
        ),
        format!(
            "Most common issue: {}",
            stats.most_common_issue.as_deref().unwrap_or("N/A")
        ),
        String::new(),
        "Jobs per tech:".to_string(),
        format!(" {}", breakdown(&stats.jobs_per_tech)),
        String::new(),
        "Jobs per address:".to_string(),
        format!(" {}", breakdown(&stats.jobs_per_address)),
        String::new(),
        "Jobs per day:".to_string(),
        format!(" {}", breakdown(&stats.jobs_per_day)),
    ];
    lines.join("\n")
}

fn job_label(job: Option<&JobRecord>) -> String {
    match job {
        Some(job) => format!("{} ({} min)", job.id, format_minutes(job.duration_minutes)),
        None => "N/A".to_string(),
    }
}

fn breakdown(counts: &BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return "(none)".to_string();
    }
    counts
        .iter()
        .map(|(label, count)| format!("{}: {}", label, count))
        .collect::<Vec<_>>()
        .join(", ")
}
