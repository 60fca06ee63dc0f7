//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while extracting keywords from a report document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read report: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid report XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("report document ends with {0} unclosed element(s)")]
    TruncatedDocument(usize),

    #[error("keyword element is missing required attribute '{0}'")]
    MissingAttribute(&'static str),

    #[error("keyword '{0}' has no status element")]
    MissingStatus(String),

    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("keyword '{label}' ends before it starts ({start} .. {end})")]
    InvertedTimestamps {
        label: String,
        start: String,
        end: String,
    },
}

/// Errors that can occur while writing the summary table
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize row: {0}")]
    SerializationFailed(#[from] csv::Error),

    #[error("invalid output path: {0}")]
    InvalidPath(String),
}
