//! cc-promptline library
//!
//! Renders a one-line status display for an interactive coding session:
//! a JSON snapshot arrives on stdin, one formatted line leaves on stdout.
//! The extraction, parsing, and rendering logic lives here so benchmarks
//! and integration tests can exercise it; process wiring stays in main.rs.

pub mod git;
pub mod input;
pub mod platform;
pub mod render;

use thiserror::Error;

/// Conditions that make rendering impossible. Everything else (missing
/// fields, git failures, absent directories) degrades to a default or an
/// omitted segment and never reaches this enum.
#[derive(Debug, Error)]
pub enum StatuslineError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[from] std::io::Error),
    #[error("invalid session JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
