//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;
pub mod progress;

/// qbank - Check and import Aiken-format question banks
#[derive(Parser, Debug)]
#[command(name = "qbank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// [DEPRECATED] Enable JSON output. Use --output-format=json or -m instead.
    #[arg(long, global = true, hide = true)]
    pub robot: bool,

    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Force plain output (no colors)
    #[arg(long, global = true)]
    pub plain: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/qbank/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Output format requested on the command line, if any.
    ///
    /// Priority order:
    /// 1. `--plain`
    /// 2. `--output-format`
    /// 3. `--machine` / `--robot` (JSON)
    #[must_use]
    pub fn requested_format(&self) -> Option<OutputFormat> {
        if self.plain {
            return Some(OutputFormat::Plain);
        }
        if let Some(fmt) = self.output_format {
            return Some(fmt);
        }
        if self.machine || self.robot {
            return Some(OutputFormat::Json);
        }
        None
    }

    /// Whether errors should be reported as JSON.
    #[must_use]
    pub fn wants_json(&self) -> bool {
        self.requested_format() == Some(OutputFormat::Json)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an Aiken file and report valid and invalid blocks
    Check(commands::check::CheckArgs),

    /// Show the question-bank records an import would create
    Convert(commands::convert::ConvertArgs),

    /// Import the valid questions of an Aiken file into the question bank
    Import(commands::import::ImportArgs),

    /// Print a sample Aiken file
    Template(commands::template::TemplateArgs),

    /// Show the effective configuration
    Config(commands::config::ConfigArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
