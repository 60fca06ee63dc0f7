//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Extracts keyword records from every input report
//! 2. Aggregates the records into per-keyword statistics
//! 3. Writes the summary table (and optional raw record dump)

use crate::aggregator::{aggregate_records, calculate_run_summary};
use crate::output::{write_raw_records, write_stats_table};
use crate::parser::{extract_keywords, KeywordRecord};
use crate::utils::config::SUMMARY_TOP_KEYWORDS;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Report documents to analyze, processed in order
    pub inputs: Vec<PathBuf>,

    /// Destination path for the summary table
    pub output: PathBuf,

    /// Append to the destination instead of replacing it
    pub append: bool,

    /// Optional destination for the flattened raw record dump
    pub raw_output: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            inputs: vec![PathBuf::from("output.xml")],
            output: PathBuf::from("output.csv"),
            append: false,
            raw_output: None,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Analyze command arguments
///
/// # Returns
/// Ok if the full pipeline succeeds, Err with context if any step fails
///
/// # Errors
/// * Report read or parse errors
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Analyzing {} report file(s)", args.inputs.len());

    // Step 1: Extract records, accumulating across all inputs
    let mut records: Vec<KeywordRecord> = Vec::new();
    for input in &args.inputs {
        info!("Step 1/3: Extracting keywords from {}", input.display());
        let appended = extract_keywords(input, &mut records)
            .with_context(|| format!("Failed to extract keywords from {}", input.display()))?;
        debug!("{} keyword invocations in {}", appended, input.display());
    }

    // Step 2: Aggregate
    info!("Step 2/3: Aggregating {} records...", records.len());
    let rows = aggregate_records(&records);

    let run = calculate_run_summary(&records);
    info!("Run summary: {}", run.summary());

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");

    if let Some(raw_path) = &args.raw_output {
        write_raw_records(&records, raw_path)
            .context("Failed to write raw record dump")?;

        info!("✓ Raw records written to: {}", raw_path.display());
    }

    write_stats_table(&rows, &args.output, args.append)
        .context("Failed to write summary table")?;

    info!("✓ Summary written to: {}", args.output.display());

    // Print text summary (if requested)
    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("KEYWORD TIMING SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Reports:      {}", args.inputs.len());
        println!("Records:      {}", run.record_count);
        println!("Keywords:     {}", run.keyword_count);
        println!("Total Time:   {}s", run.total_seconds);
        println!("Non-passing:  {}", run.failed_count);
        println!();
        for row in rows.iter().take(SUMMARY_TOP_KEYWORDS) {
            println!(
                "{:6}s  x{:<4} (longest {}s)  {}",
                row.total_time, row.occurrences, row.longest, row.keyword
            );
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.inputs.is_empty() {
        anyhow::bail!("At least one input report is required");
    }

    if args.inputs.iter().any(|p| p.as_os_str().is_empty()) {
        anyhow::bail!("Input paths cannot be empty");
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if let Some(raw_path) = &args.raw_output {
        if raw_path.as_os_str().is_empty() {
            anyhow::bail!("Raw output path cannot be empty");
        }
        if raw_path == &args.output {
            anyhow::bail!("Raw output path must differ from the summary output path");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_valid() {
        let args = AnalyzeArgs::default();
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_no_inputs() {
        let args = AnalyzeArgs {
            inputs: Vec::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_input_path() {
        let args = AnalyzeArgs {
            inputs: vec![PathBuf::new()],
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_output_path() {
        let args = AnalyzeArgs {
            output: PathBuf::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_raw_colliding_with_output() {
        let args = AnalyzeArgs {
            raw_output: Some(PathBuf::from("output.csv")),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
