//! Input/output operations and error handling
//!
//! This module contains:
//! - Error types and named configuration constants
//! - JSON request loading and plain-text rendering
//! - The command-line interface and its progress display

/// Batch command-line interface
pub mod cli;
/// Knitting constants and defaults
pub mod configuration;
/// Error types and helpers
pub mod error;
/// Progress bars for batch runs
pub mod progress;
/// Template rendering of semantic instruction text
pub mod render;
/// Pattern requests read from JSON
pub mod request;
