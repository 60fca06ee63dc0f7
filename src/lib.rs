//! Robot Trace
//!
//! Keyword timing analysis for Robot Framework execution results.
//!
//! This crate provides the core implementation for the
//! `robot-trace` CLI tool: it walks `output.xml` report documents,
//! flattens every keyword invocation into a timing record, and
//! aggregates the records into a per-keyword summary table.

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
