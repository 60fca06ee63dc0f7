//! Robot Trace CLI
//!
//! A keyword timing analysis tool for Robot Framework execution results.
//! Flattens report documents into timing records and produces a
//! per-keyword summary table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use robot_trace::commands::{execute_analyze, validate_args, AnalyzeArgs};

/// Robot Trace - Keyword timing analysis for Robot Framework results
#[derive(Parser, Debug)]
#[command(name = "robot-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze one or more report documents
    Analyze {
        /// Comma-separated list of report files (output.xml)
        #[arg(short, long, required = true, value_delimiter = ',')]
        input: Vec<PathBuf>,

        /// Destination path for the summary table
        #[arg(short, long)]
        output: PathBuf,

        /// Append to the output file instead of replacing it
        #[arg(long)]
        append: bool,

        /// Write the flattened records to this path as well
        #[arg(long)]
        raw: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            append,
            raw,
            summary,
        } => {
            let args = AnalyzeArgs {
                inputs: input,
                output,
                append,
                raw_output: raw,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute analysis
            execute_analyze(args)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Robot Trace v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Keyword timing analysis for Robot Framework execution results.");
}
