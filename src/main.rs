//! qbank - Check and import Aiken-format question banks.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use qbank::app::AppContext;
use qbank::cli::Cli;
use qbank::cli::output::{emit_json, robot_error_structured};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);
    // Config and env may select JSON too; fall back to the flags when loading failed.
    let json = ctx.as_ref().map_or_else(|_| cli.wants_json(), |ctx| ctx.robot_mode);
    init_tracing(&cli, json);

    match ctx.and_then(|ctx| qbank::cli::commands::run(&ctx, &cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                // Robot mode: JSON error envelope on stdout
                if emit_json(&robot_error_structured(&e)).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                let structured = e.to_structured();
                eprintln!("Error: {e}");
                eprintln!("Hint: {}", structured.suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli, json: bool) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,qbank=info",
        1 => "info,qbank=debug",
        2 => "debug,qbank=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
