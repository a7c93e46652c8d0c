//! qbank config - show the effective configuration.

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::config::Config;
use crate::error::{QbError, Result};

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub toml: bool,

    /// Show which config files are read
    #[arg(long)]
    pub paths: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    let config = ctx.config.redacted();

    if ctx.robot_mode {
        return emit_json(&robot_ok(serde_json::json!({
            "config": config,
            "sources": sources(ctx),
        })));
    }

    if args.toml {
        let raw = toml::to_string_pretty(&config)
            .map_err(|err| QbError::Serialization(format!("serialize config: {err}")))?;
        print!("{raw}");
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.title("qbank configuration");
    layout
        .section("[api]")
        .kv("base_url", or_unset(&config.api.base_url))
        .kv("create_path", &config.api.create_path)
        .kv("token", config.api.token.as_deref().unwrap_or("(unset)"))
        .kv("timeout_secs", &config.api.timeout_secs.to_string())
        .blank();
    layout
        .section("[import]")
        .kv(
            "folder_id",
            config.import.folder_id.as_deref().unwrap_or("(unset)"),
        )
        .kv("difficulty", config.import.difficulty.as_str())
        .kv("default_mark", &config.import.default_mark.to_string())
        .kv("strict", &config.import.strict.to_string())
        .blank();
    layout.section("[output]").kv("format", &config.output.format);

    if args.paths {
        layout.blank().section("Sources");
        for source in sources(ctx) {
            layout.bullet(&source);
        }
    }

    emit_human(layout);
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}

fn sources(ctx: &AppContext) -> Vec<String> {
    if let Some(path) = &ctx.config_path {
        return vec![path.display().to_string()];
    }
    let mut paths = Vec::new();
    if let Some(global) = Config::global_path() {
        paths.push(global.display().to_string());
    }
    paths.push(Config::project_path(&ctx.root).display().to_string());
    paths
}
