use chrono::{DateTime, Utc};
use clap::ValueEnum;
use console::style;
use serde::Serialize;

use crate::error::{ErrorCode, QbError, Result};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable formatted output with colors (default)
    #[default]
    Human,
    /// Pretty-printed JSON envelope
    Json,
    /// Plain text without colors
    Plain,
}

impl OutputFormat {
    #[must_use]
    pub const fn use_colors(&self) -> bool {
        matches!(self, Self::Human)
    }

    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Json)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = QbError;

    fn from_str(value: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(value.trim(), true).map_err(|_| {
            QbError::Config(format!(
                "invalid output format {value} (expected human|json|plain)"
            ))
        })
    }
}

#[derive(Serialize)]
pub struct RobotResponse<T> {
    pub status: RobotStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub data: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> RobotResponse<T> {
    #[must_use]
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Ok,
    Error {
        /// Error code enum value (e.g., "INPUT_NOT_FOUND")
        code: ErrorCode,
        /// Numeric error code (e.g., 101)
        numeric_code: u16,
        message: String,
        suggestion: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<serde_json::Value>,
        recoverable: bool,
        category: String,
    },
    /// Some records succeeded and some failed.
    Partial { completed: usize, failed: usize },
}

impl From<&QbError> for RobotStatus {
    fn from(err: &QbError) -> Self {
        let structured = err.to_structured();
        Self::Error {
            code: structured.code,
            numeric_code: structured.numeric_code,
            message: structured.message,
            suggestion: structured.suggestion,
            context: structured.context,
            recoverable: structured.recoverable,
            category: structured.category,
        }
    }
}

fn response<T>(status: RobotStatus, data: T) -> RobotResponse<T> {
    RobotResponse {
        status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data,
        warnings: Vec::new(),
    }
}

pub fn robot_ok<T: Serialize>(data: T) -> RobotResponse<T> {
    response(RobotStatus::Ok, data)
}

/// Envelope for a run where `failed` of `completed + failed` records failed.
pub fn robot_partial<T: Serialize>(data: T, completed: usize, failed: usize) -> RobotResponse<T> {
    response(RobotStatus::Partial { completed, failed }, data)
}

/// Error envelope carrying the code, suggestion and context.
pub fn robot_error_structured(err: &QbError) -> RobotResponse<serde_json::Value> {
    response(RobotStatus::from(err), serde_json::Value::Null)
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| QbError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.chars().count().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines
            .push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Plain".parse::<OutputFormat>().unwrap(), OutputFormat::Plain);
        assert!("tsv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn robot_ok_envelope() {
        let resp = robot_ok(serde_json::json!({ "valid": 2 }));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["data"]["valid"], 2);
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn robot_partial_envelope() {
        let resp = robot_partial(serde_json::json!({}), 4, 1)
            .with_warnings(vec!["1 invalid block skipped".to_string()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"]["partial"]["completed"], 4);
        assert_eq!(json["status"]["partial"]["failed"], 1);
        assert_eq!(json["warnings"][0], "1 invalid block skipped");
    }

    #[test]
    fn robot_error_envelope() {
        let err = QbError::Precondition("no target folder selected".to_string());
        let json = serde_json::to_value(robot_error_structured(&err)).unwrap();
        let status = &json["status"]["error"];
        assert_eq!(status["code"], "IMPORT_PRECONDITION");
        assert_eq!(status["numeric_code"], 601);
        assert!(status["suggestion"].as_str().unwrap().contains("--folder"));
        assert!(json["data"].is_null());
    }

    #[test]
    fn human_layout_lines() {
        console::set_colors_enabled(false);
        let mut layout = HumanLayout::new();
        layout.section("Summary").kv("Valid", "2").bullet("line 3");
        let text = layout.build();
        assert!(text.contains("Summary\n-------"));
        assert!(text.contains("Valid"));
        assert!(text.contains("- line 3"));
    }
}
