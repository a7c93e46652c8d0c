//! Per-invocation application context.

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub root: PathBuf,
    pub output_format: OutputFormat,
    pub robot_mode: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = resolve_root()?;
        let config_path = cli
            .config
            .clone()
            .or_else(|| std::env::var_os("QBANK_CONFIG").map(PathBuf::from));
        let config = Config::load(config_path.as_deref(), &root)?;

        let output_format = match cli.requested_format() {
            Some(format) => format,
            None => config.output.format.parse()?,
        };
        if !output_format.use_colors() {
            console::set_colors_enabled(false);
        }

        Ok(Self {
            config,
            config_path,
            root,
            robot_mode: output_format.is_machine_readable(),
            output_format,
            quiet: cli.quiet,
            verbosity: cli.verbose,
        })
    }
}

fn resolve_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("QBANK_ROOT") {
        return Ok(PathBuf::from(root));
    }
    Ok(std::env::current_dir()?)
}
