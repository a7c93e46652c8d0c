//! qbank: Aiken-format multiple-choice question banks.
//!
//! - [`aiken`] parses Aiken text into questions and recoverable errors.
//! - [`bank`] converts questions into question-bank records and imports
//!   them sequentially over HTTP.
//! - [`cli`] is the `qbank` command-line front end.

pub mod aiken;
pub mod app;
pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod test_utils;

pub use error::{QbError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
