//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use std::io::Read;
use std::path::Path;

use clap::Args;
use tracing::debug;

use crate::aiken::{AikenParser, ParsedResults};
use crate::app::AppContext;
use crate::bank::{Difficulty, ImportTarget};
use crate::cli::Commands;
use crate::config::ImportConfig;
use crate::error::{QbError, Result};

pub mod check;
pub mod completions;
pub mod config;
pub mod convert;
pub mod import;
pub mod template;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Check(args) => check::run(ctx, args),
        Commands::Convert(args) => convert::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Template(args) => template::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
        Commands::Completions(args) => completions::run(ctx, args),
    }
}

/// Target options shared by `convert` and `import`.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Destination folder id (default: import.folder_id)
    #[arg(long)]
    pub folder: Option<String>,

    /// Difficulty for every imported question (default: import.difficulty)
    #[arg(long, value_enum)]
    pub difficulty: Option<Difficulty>,

    /// Default mark for every imported question (default: import.default_mark)
    #[arg(long)]
    pub mark: Option<f64>,
}

impl TargetArgs {
    /// Merge flags over the `[import]` config section. A missing folder
    /// resolves to an empty id, which the import refuses.
    #[must_use]
    pub fn resolve(&self, config: &ImportConfig) -> ImportTarget {
        let folder_id = self
            .folder
            .clone()
            .or_else(|| config.folder_id.clone())
            .unwrap_or_default();
        ImportTarget::new(
            folder_id.trim(),
            self.difficulty.unwrap_or(config.difficulty),
            self.mark.unwrap_or(config.default_mark),
        )
    }
}

/// Read a question bank from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    let bytes = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        if !path.exists() {
            return Err(QbError::NotFound(path.display().to_string()));
        }
        std::fs::read(path)?
    };

    String::from_utf8(bytes).map_err(|_| {
        QbError::InvalidInput(format!("{} is not valid UTF-8 text", display_path(path)))
    })
}

/// Read and parse a question bank.
pub fn parse_input(path: &Path) -> Result<ParsedResults> {
    let text = read_input(path)?;
    debug!(path = %display_path(path), bytes = text.len(), "Parsing question bank");
    Ok(AikenParser::new().parse(&text))
}

/// One warning line per invalid block, in source order.
#[must_use]
pub fn invalid_block_lines(results: &ParsedResults) -> Vec<String> {
    results
        .errors
        .iter()
        .map(|error| {
            format!(
                "line {}: {} ({})",
                error.line,
                error.kind.describe(),
                error.text
            )
        })
        .collect()
}

pub(crate) fn display_path(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}
