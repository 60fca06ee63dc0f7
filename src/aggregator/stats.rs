//! Per-keyword statistics over the flattened record set.
//!
//! Grouping is a single pass over the records: every record lands in
//! exactly one accumulator, and every distinct label produces exactly
//! one output row.

use crate::parser::schema::KeywordRecord;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated timing statistics for one keyword label
///
/// **Public** - one output row of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    /// The grouping label
    pub keyword: String,

    /// Number of records sharing the label
    // Historical header spelling, kept for output compatibility
    #[serde(rename = "occurences")]
    pub occurrences: u64,

    /// Sum of duration_seconds over the group
    pub total_time: u64,

    /// total_time / occurrences; a group has at least one member
    pub average: f64,

    /// Largest duration_seconds in the group
    pub longest: u64,
}

#[derive(Default)]
struct Accumulator {
    occurrences: u64,
    total_time: u64,
    longest: u64,
}

/// Group records by label and compute one statistics row per group
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - The full flattened record set
///
/// # Returns
/// One row per distinct label, sorted by total time (descending);
/// ties break on the label so output is deterministic. Row order is
/// not part of the output contract.
pub fn aggregate_records(records: &[KeywordRecord]) -> Vec<KeywordStats> {
    debug!("Aggregating {} keyword records", records.len());

    let mut groups: HashMap<&str, Accumulator> = HashMap::new();

    for record in records {
        let acc = groups.entry(record.label.as_str()).or_default();
        acc.occurrences += 1;
        acc.total_time += record.duration_seconds;
        acc.longest = acc.longest.max(record.duration_seconds);
    }

    let mut rows: Vec<KeywordStats> = groups
        .into_iter()
        .map(|(label, acc)| KeywordStats {
            keyword: label.to_string(),
            occurrences: acc.occurrences,
            total_time: acc.total_time,
            average: acc.total_time as f64 / acc.occurrences as f64,
            longest: acc.longest,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_time
            .cmp(&a.total_time)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });

    debug!("Built {} keyword statistics rows", rows.len());

    rows
}

/// Whole-run summary figures
///
/// **Public** - returned from calculate_run_summary
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Total number of keyword records
    pub record_count: usize,

    /// Number of distinct keyword labels
    pub keyword_count: usize,

    /// Seconds spent across all records
    pub total_seconds: u64,

    /// Records whose status is not PASS
    pub failed_count: usize,
}

impl RunSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the summary printout
    pub fn summary(&self) -> String {
        format!(
            "Records: {} | Keywords: {} | Total: {}s | Non-passing: {}",
            self.record_count, self.keyword_count, self.total_seconds, self.failed_count
        )
    }
}

/// Calculate whole-run summary figures from the record set
///
/// **Public** - provides summary statistics
pub fn calculate_run_summary(records: &[KeywordRecord]) -> RunSummary {
    let mut labels: Vec<&str> = records.iter().map(|r| r.label.as_str()).collect();
    labels.sort_unstable();
    labels.dedup();

    RunSummary {
        record_count: records.len(),
        keyword_count: labels.len(),
        total_seconds: records.iter().map(|r| r.duration_seconds).sum(),
        failed_count: records.iter().filter(|r| r.status != "PASS").count(),
    }
}
