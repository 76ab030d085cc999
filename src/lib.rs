//! Vantage core library.
//!
//! This crate exposes programmatic APIs for orchestrating test-tool
//! categories, aggregating their results into consolidated reports, and
//! scoring a documentation tree against a fixed checklist.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `runner`: Concurrent category execution with per-category isolation.
//! - `artifacts`: Read-back of tool-written JSON artifacts.
//! - `report`: Metrics computation and HTML/JSON/Markdown rendering.
//! - `validator`: Documentation-tree scoring and report persistence.
//! - `ux`: Browser probe harness behind a driver seam.
//! - `models`: Shared result and report data types.
//! - `output`: Human/JSON printers for the CLI.

pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod report;
pub mod runner;
pub mod ux;
pub mod validator;
