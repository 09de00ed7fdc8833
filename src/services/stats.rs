//! Statistics engine: a pure aggregation over a job collection.

use std::collections::{BTreeMap, HashMap};

use crate::models::{JobRecord, StatsReport};

/// Substrings that mark a signal reading as bad (matched case-insensitively).
pub const BAD_SIGNAL_WORDS: [&str; 4] = ["bad", "poor", "weak", "low"];

/// Label used when a grouping field is blank.
const UNKNOWN: &str = "Unknown";

/// Compute aggregate statistics over `jobs`.
///
/// Never fails. Sums are accumulated at full precision and rounded to two
/// decimals only in the returned report.
pub fn compute_stats(jobs: &[JobRecord]) -> StatsReport {
    if jobs.is_empty() {
        return StatsReport::default();
    }

    let total_jobs = jobs.len();
    let mut total_minutes = 0.0;
    let mut longest: &JobRecord = &jobs[0];
    let mut shortest: &JobRecord = &jobs[0];
    let mut jobs_per_tech = BTreeMap::new();
    let mut jobs_per_address = BTreeMap::new();
    let mut jobs_per_day = BTreeMap::new();
    let mut issues = IssueCounter::default();
    let mut bad_signal_count = 0;

    for job in jobs {
        let duration = job.duration_minutes;
        total_minutes += duration;

        // Strict comparisons keep the first record on ties.
        if duration > longest.duration_minutes {
            longest = job;
        }
        if duration < shortest.duration_minutes {
            shortest = job;
        }

        *jobs_per_tech.entry(label_or_unknown(&job.tech_name)).or_insert(0) += 1;
        *jobs_per_address.entry(label_or_unknown(&job.address)).or_insert(0) += 1;
        *jobs_per_day.entry(day_key(&job.start_time)).or_insert(0) += 1;
        issues.add(label_or_unknown(&job.issue));

        if is_bad_signal(&job.signal) {
            bad_signal_count += 1;
        }
    }

    let avg_minutes = total_minutes / total_jobs as f64;
    let bad_signal_percent = bad_signal_count as f64 / total_jobs as f64 * 100.0;

    StatsReport {
        total_jobs,
        total_minutes: round2(total_minutes),
        avg_minutes: round2(avg_minutes),
        longest_job: Some(longest.clone()),
        shortest_job: Some(shortest.clone()),
        jobs_per_tech,
        jobs_per_address,
        jobs_per_day,
        bad_signal_count,
        bad_signal_percent: round2(bad_signal_percent),
        most_common_issue: issues.most_common(),
    }
}

/// Whether a signal reading loosely matches the bad-signal vocabulary.
pub fn is_bad_signal(signal: &str) -> bool {
    let lowered = signal.to_lowercase();
    BAD_SIGNAL_WORDS.iter().any(|word| lowered.contains(word))
}

fn label_or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// First ten characters of the start timestamp (`YYYY-MM-DD`).
fn day_key(start_time: &str) -> String {
    if start_time.chars().count() >= 10 {
        start_time.chars().take(10).collect()
    } else {
        UNKNOWN.to_string()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Frequency counter that remembers first-seen order for tie-breaking.
#[derive(Default)]
struct IssueCounter {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl IssueCounter {
    fn add(&mut self, issue: String) {
        match self.index.get(&issue) {
            Some(&slot) => self.order[slot].1 += 1,
            None => {
                self.index.insert(issue.clone(), self.order.len());
                self.order.push((issue, 1));
            }
        }
    }

    fn most_common(&self) -> Option<String> {
        let mut best: Option<&(String, usize)> = None;
        for entry in &self.order {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(issue, _)| issue.clone())
    }
}
