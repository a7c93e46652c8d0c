//! qbank convert - show the records an import would send.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::bank::{ImportTarget, NewQuestion, convert_all};
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::cli::progress::ProgressReporter;
use crate::error::Result;

use super::{TargetArgs, invalid_block_lines, parse_input};

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Aiken file to convert (`-` reads stdin)
    pub file: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,
}

#[derive(Debug, Serialize)]
struct ConvertOutput<'a> {
    target: &'a ImportTarget,
    count: usize,
    records: &'a [NewQuestion],
}

pub fn run(ctx: &AppContext, args: &ConvertArgs) -> Result<()> {
    let results = parse_input(&args.file)?;
    let target = args.target.resolve(&ctx.config.import);
    let records = convert_all(&results.questions, &target);
    let warnings = invalid_block_lines(&results);

    if ctx.robot_mode {
        let output = ConvertOutput {
            target: &target,
            count: records.len(),
            records: &records,
        };
        return emit_json(&robot_ok(output).with_warnings(warnings));
    }

    let reporter = ProgressReporter::new(false, ctx.quiet);
    for warning in &warnings {
        reporter.warn(&format!("skipping invalid block at {warning}"));
    }
    emit_human(human_records(&target, &records));
    Ok(())
}

fn human_records(target: &ImportTarget, records: &[NewQuestion]) -> HumanLayout {
    let mut layout = HumanLayout::new();
    let folder = if target.folder_id.is_empty() {
        "(none)"
    } else {
        target.folder_id.as_str()
    };
    layout
        .title(&format!("{} record(s)", records.len()))
        .kv("Folder", folder)
        .kv("Difficulty", target.difficulty.as_str())
        .kv("Mark", &target.default_mark.to_string());

    for record in records {
        layout.blank().section(&record.name);
        for option in &record.options {
            layout.push_line(format!("  [{:>3}] {}", option.grade, option.text));
        }
    }
    layout
}
