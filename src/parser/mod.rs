//! Report parsing and record extraction.
//!
//! This module handles:
//! - Walking report XML documents with quick-xml
//! - Flattening keyword invocations into timing records
//! - Normalizing keyword labels for grouping
//! - Timestamp parsing and duration computation

pub mod label;
pub mod report;
pub mod schema;

// Re-export main types and functions
pub use label::normalize_label;
pub use report::{extract_keywords, extract_keywords_from_str, parse_timestamp};
pub use schema::KeywordRecord;
