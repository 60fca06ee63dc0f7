//! Configuration and constants for the CLI.

/// Timestamp format used by report documents: `YYYYMMDD HH:MM:SS.ffffff`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S%.f";

/// Field delimiter for the summary table and raw record dump
pub const FIELD_DELIMITER: u8 = b';';

// BDD connective words stripped from the start of a keyword label.
// The separator after the connective is stripped with it, so the
// removed byte counts are 6, 5, 5 and 4 respectively.
pub const BDD_PREFIXES: &[&str] = &["given", "when", "then", "and"];

// Element and attribute names of the report document format
pub const KEYWORD_TAG: &[u8] = b"kw";
pub const STATUS_TAG: &[u8] = b"status";

/// Number of keywords shown in the `--summary` stdout block
pub const SUMMARY_TOP_KEYWORDS: usize = 10;
