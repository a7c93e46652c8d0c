//! qbank check - validate an Aiken file.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::aiken::{AikenQuestion, ParseError, ParsedResults};
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::{QbError, Result};

use super::{display_path, parse_input};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Aiken file to check (`-` reads stdin)
    pub file: PathBuf,

    /// List the parsed questions as well as the errors
    #[arg(long)]
    pub show_questions: bool,

    /// Exit with an error when any block is invalid
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file: String,
    pub valid: usize,
    pub invalid: usize,
    pub error_blocks: Vec<String>,
    pub errors: Vec<ParseError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<AikenQuestion>>,
}

impl CheckReport {
    #[must_use]
    pub fn new(file: String, results: ParsedResults, show_questions: bool) -> Self {
        Self {
            file,
            valid: results.valid_count(),
            invalid: results.failed_count,
            error_blocks: results.error_blocks,
            errors: results.errors,
            questions: show_questions.then_some(results.questions),
        }
    }
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let results = parse_input(&args.file)?;
    let report = CheckReport::new(display_path(&args.file), results, args.show_questions);

    if args.strict && report.invalid > 0 {
        if !ctx.robot_mode {
            emit_human(human_report(&report));
        }
        return Err(strict_failure(&report));
    }

    if ctx.robot_mode {
        return emit_json(&robot_ok(&report));
    }
    emit_human(human_report(&report));
    Ok(())
}

fn strict_failure(report: &CheckReport) -> QbError {
    let first = report
        .errors
        .first()
        .map(|e| format!("; first at line {}", e.line))
        .unwrap_or_default();
    QbError::ValidationFailed(format!(
        "{} has {} invalid block(s){first}",
        report.file, report.invalid
    ))
}

fn human_report(report: &CheckReport) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("Aiken check: {}", report.file))
        .kv("Valid", &report.valid.to_string())
        .kv("Invalid", &report.invalid.to_string());

    if let Some(questions) = &report.questions {
        layout.blank().section("Questions");
        for (idx, question) in questions.iter().enumerate() {
            layout.push_line(format!("{}. {}", idx + 1, question.question));
            for option in &question.options {
                let marker = if option.key == question.answer { "*" } else { " " };
                layout.push_line(format!("   {marker} {}. {}", option.key, option.text));
            }
        }
    }

    if !report.errors.is_empty() {
        layout.blank().section("Invalid blocks");
        for error in &report.errors {
            layout.bullet(&format!(
                "line {}: {} ({})",
                error.line,
                error.kind.describe(),
                error.text
            ));
        }
    }

    layout
}
