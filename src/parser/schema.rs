//! Record schema for flattened keyword invocations.
//!
//! One `KeywordRecord` is produced per keyword element found in a
//! report document. Records are created once and never mutated; the
//! aggregator consumes them read-only.

use serde::{Deserialize, Serialize};

/// A single keyword invocation with its timing outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// Normalized keyword label used as the grouping key (not unique)
    pub label: String,

    /// Outcome token taken verbatim from the document (e.g. PASS/FAIL)
    pub status: String,

    /// Whole seconds between the recorded start and end timestamps
    pub duration_seconds: u64,

    /// Original start timestamp string, passed through unmodified
    pub start_timestamp: String,

    /// Original end timestamp string, passed through unmodified
    pub end_timestamp: String,
}
