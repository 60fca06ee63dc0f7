//! Delimited summary table writer.
//!
//! Writes KeywordStats rows as a semicolon-delimited table with a
//! header row. Fields containing the delimiter are quoted by the csv
//! writer instead of corrupting the row.

use crate::aggregator::stats::KeywordStats;
use crate::parser::schema::KeywordRecord;
use crate::utils::config::FIELD_DELIMITER;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Write the summary table to a file
///
/// **Public** - main entry point for table output
///
/// # Arguments
/// * `rows` - Statistics rows to write
/// * `output_path` - Path to the destination file
/// * `append` - Keep existing content and add a fresh header+rows
///   section at the end; without it the destination is replaced.
///   Appending writes one header per run.
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - Row serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_stats_table(
    rows: &[KeywordStats],
    output_path: impl AsRef<Path>,
    append: bool,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary table to: {}", output_path.display());

    let file = open_destination(output_path, append)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .from_writer(file);

    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "Summary table written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Write the flattened record set as a headerless dump
///
/// **Public** - explicit on-disk artifact for callers that want the
/// pre-aggregation records; replaces the destination on every run
pub fn write_raw_records(
    records: &[KeywordRecord],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing raw record dump to: {}", output_path.display());

    let file = open_destination(output_path, false)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

/// Read a summary table back from a file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::SerializationFailed` - File unreadable or a row
///   does not match the table schema
pub fn read_stats_table(input_path: impl AsRef<Path>) -> Result<Vec<KeywordStats>, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading summary table from: {}", input_path.display());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .from_path(input_path)?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }

    debug!("Summary table loaded: {} rows", rows.len());

    Ok(rows)
}

/// Validate the path and open the destination file
///
/// **Private** - shared by both writers
fn open_destination(path: &Path, append: bool) -> Result<File, OutputError> {
    validate_output_path(path)?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = if append {
        OpenOptions::new().append(true).create(true).open(path)
    } else {
        File::create(path)
    };

    file.map_err(OutputError::WriteFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_rows() -> Vec<KeywordStats> {
        vec![
            KeywordStats {
                keyword: "Open Browser".to_string(),
                occurrences: 3,
                total_time: 12,
                average: 4.0,
                longest: 6,
            },
            KeywordStats {
                keyword: "Log".to_string(),
                occurrences: 2,
                total_time: 1,
                average: 0.5,
                longest: 1,
            },
        ]
    }

    #[test]
    fn test_write_and_read_table() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_stats_table(&sample_rows(), path, false).unwrap();

        let loaded = read_stats_table(path).unwrap();
        assert_eq!(loaded, sample_rows());
    }

    #[test]
    fn test_header_uses_historical_spelling() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_stats_table(&sample_rows(), path, false).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, "keyword;occurences;total_time;average;longest");
    }

    #[test]
    fn test_truncate_replaces_previous_run() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_stats_table(&sample_rows(), path, false).unwrap();
        write_stats_table(&sample_rows(), path, false).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let headers = content
            .lines()
            .filter(|l| l.starts_with("keyword;"))
            .count();
        assert_eq!(headers, 1);
    }

    #[test]
    fn test_append_accumulates_headers_and_rows() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_stats_table(&sample_rows(), path, true).unwrap();
        write_stats_table(&sample_rows(), path, true).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let headers = content
            .lines()
            .filter(|l| l.starts_with("keyword;"))
            .count();
        assert_eq!(headers, 2);
        assert_eq!(content.lines().count(), 6);
    }

    #[test]
    fn test_keyword_containing_delimiter_round_trips() {
        let rows = vec![KeywordStats {
            keyword: "Run; Cleanup".to_string(),
            occurrences: 1,
            total_time: 1,
            average: 1.0,
            longest: 1,
        }];
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_stats_table(&rows, path, false).unwrap();

        let loaded = read_stats_table(path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_raw_dump_has_no_header() {
        let records = vec![KeywordRecord {
            label: "Log".to_string(),
            status: "PASS".to_string(),
            duration_seconds: 1,
            start_timestamp: "20240101 10:00:00.000000".to_string(),
            end_timestamp: "20240101 10:00:01.000000".to_string(),
        }];
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_raw_records(&records, path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(
            content.trim_end(),
            "Log;PASS;1;20240101 10:00:00.000000;20240101 10:00:01.000000"
        );
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/summary.csv");

        write_stats_table(&sample_rows(), &nested_path, false).unwrap();

        assert!(nested_path.exists());
    }
}
