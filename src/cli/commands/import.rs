//! qbank import - create draft MCQ questions from an Aiken file.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::app::AppContext;
use crate::bank::{
    ImportSummary, ImportTarget, NewQuestion, QuestionBankClient, check_preconditions,
    convert_all, import_questions,
};
use crate::cli::output::{
    HumanLayout, emit_human, emit_json, robot_ok, robot_partial,
};
use crate::cli::progress::ProgressReporter;
use crate::error::{QbError, Result};

use super::{TargetArgs, display_path, invalid_block_lines, parse_input};

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Aiken file to import (`-` reads stdin)
    pub file: PathBuf,

    #[command(flatten)]
    pub target: TargetArgs,

    /// Question bank base URL (default: api.base_url)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Parse and convert, but send nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Refuse the import when any block is invalid
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct DryRunOutput<'a> {
    dry_run: bool,
    target: &'a ImportTarget,
    count: usize,
    records: &'a [NewQuestion],
}

#[derive(Debug, Serialize)]
struct ImportOutput<'a> {
    file: String,
    target: &'a ImportTarget,
    skipped_invalid: usize,
    #[serde(flatten)]
    summary: &'a ImportSummary,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let results = parse_input(&args.file)?;
    let warnings = invalid_block_lines(&results);
    let reporter = ProgressReporter::new(ctx.robot_mode, ctx.quiet);

    if results.has_errors() {
        if args.strict || ctx.config.import.strict {
            return Err(QbError::ValidationFailed(format!(
                "{} has {} invalid block(s); fix them or drop --strict",
                display_path(&args.file),
                results.failed_count
            )));
        }
        reporter.warn(&format!(
            "{} invalid block(s) will be skipped; importing {} valid question(s)",
            results.failed_count,
            results.valid_count()
        ));
        if !ctx.robot_mode {
            for warning in &warnings {
                reporter.warn(warning);
            }
        }
    }

    let target = args.target.resolve(&ctx.config.import);
    check_preconditions(&results.questions, &target)?;

    if args.dry_run {
        let records = convert_all(&results.questions, &target);
        info!(count = records.len(), "Dry run, nothing sent");
        if ctx.robot_mode {
            let output = DryRunOutput {
                dry_run: true,
                target: &target,
                count: records.len(),
                records: &records,
            };
            return emit_json(&robot_ok(output).with_warnings(warnings));
        }
        let mut layout = HumanLayout::new();
        layout
            .title("Dry run: nothing was sent")
            .kv("Would import", &records.len().to_string())
            .kv("Folder", &target.folder_id)
            .kv("Difficulty", target.difficulty.as_str());
        for record in &records {
            layout.bullet(&record.name);
        }
        emit_human(layout);
        return Ok(());
    }

    let mut api = ctx.config.api.clone();
    if let Some(base_url) = &args.base_url {
        api.base_url.clone_from(base_url);
    }
    let mut client = QuestionBankClient::from_config(&api)?;
    if !ctx.robot_mode {
        reporter.log(&format!(
            "Importing {} question(s) into folder {} via {}",
            results.valid_count(),
            target.folder_id,
            client.endpoint()
        ));
    }

    let mut progress = reporter.progress(results.questions.len() as u64, "Importing questions");
    let summary = import_questions(&mut client, &results.questions, &target, &mut progress)?;

    if !summary.had_effect() {
        progress.abandon_with_message("no question was created");
        let first = summary
            .failures
            .first()
            .map(|f| format!("; first failure: {}", f.message))
            .unwrap_or_default();
        return Err(QbError::Import(format!(
            "all {} question(s) failed{first}",
            summary.failed
        )));
    }
    progress.finish_with_message(&format!(
        "{} succeeded / {} failed",
        summary.succeeded, summary.failed
    ));

    if ctx.robot_mode {
        let output = ImportOutput {
            file: display_path(&args.file),
            target: &target,
            skipped_invalid: results.failed_count,
            summary: &summary,
        };
        let response = if summary.failed == 0 {
            robot_ok(output)
        } else {
            robot_partial(output, summary.succeeded, summary.failed)
        };
        return emit_json(&response.with_warnings(warnings));
    }

    emit_human(human_summary(&summary, results.failed_count));
    Ok(())
}

fn human_summary(summary: &ImportSummary, skipped_invalid: usize) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title(&format!(
        "{} succeeded / {} failed",
        summary.succeeded, summary.failed
    ));
    if skipped_invalid > 0 {
        layout.kv("Skipped", &format!("{skipped_invalid} invalid block(s)"));
    }
    if !summary.failures.is_empty() {
        layout.blank().section("Failed questions");
        for failure in &summary.failures {
            layout.bullet(&format!(
                "#{} {}: {}",
                failure.index + 1,
                failure.name,
                failure.message
            ));
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::RecordFailure;

    #[test]
    fn summary_headline_and_failures() {
        console::set_colors_enabled(false);
        let summary = ImportSummary {
            total: 3,
            succeeded: 2,
            failed: 1,
            created_ids: vec!["a".to_string(), "b".to_string()],
            failures: vec![RecordFailure {
                index: 1,
                name: "Second?".to_string(),
                message: "HTTP 500".to_string(),
            }],
        };
        let text = human_summary(&summary, 1).build();
        assert!(text.starts_with("2 succeeded / 1 failed"));
        assert!(text.contains("1 invalid block(s)"));
        assert!(text.contains("#2 Second?: HTTP 500"));
    }

    #[test]
    fn import_output_flattens_summary() {
        let summary = ImportSummary {
            total: 1,
            succeeded: 1,
            failed: 0,
            created_ids: vec!["q-1".to_string()],
            failures: Vec::new(),
        };
        let target = ImportTarget::new("f", crate::bank::Difficulty::Easy, 1.0);
        let output = ImportOutput {
            file: "bank.txt".to_string(),
            target: &target,
            skipped_invalid: 0,
            summary: &summary,
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["succeeded"], 1);
        assert_eq!(json["created_ids"][0], "q-1");
        assert_eq!(json["target"]["difficulty"], "EASY");
    }
}
