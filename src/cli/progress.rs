//! Import progress reporting.
//!
//! Adapts to the output context:
//! - TTY: an animated progress bar
//! - non-TTY: one line per attempted record on stderr
//! - robot: JSON progress events on stderr
//! - quiet: nothing

use std::io::IsTerminal;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::bank::{ImportObserver, ImportProgress};

/// Progress output mode based on terminal capabilities and user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Tty,
    NonTty,
    Robot,
    Quiet,
}

impl ProgressMode {
    /// Detect the appropriate progress mode based on environment
    #[must_use]
    pub fn detect(robot_mode: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if robot_mode {
            Self::Robot
        } else if std::io::stderr().is_terminal() {
            Self::Tty
        } else {
            Self::NonTty
        }
    }

    /// Check if this mode produces output
    #[must_use]
    pub const fn has_output(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEventType {
    ProgressStart,
    ProgressUpdate,
    ProgressComplete,
    ProgressError,
}

/// JSON progress event for robot mode
#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub event: ProgressEventType,
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl ProgressEvent {
    fn new(event: ProgressEventType, operation: &str) -> Self {
        Self {
            event_type: "progress",
            event,
            operation: operation.to_string(),
            current: None,
            total: None,
            succeeded: None,
            failed: None,
            message: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    fn with_progress(mut self, current: u64, total: u64) -> Self {
        self.current = Some(current);
        self.total = Some(total);
        self
    }

    fn with_outcome(mut self, succeeded: u64, failed: u64) -> Self {
        self.succeeded = Some(succeeded);
        self.failed = Some(failed);
        self
    }

    fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            eprintln!("{json}");
        }
    }
}

/// Creates progress handles and side-channel messages for the current mode.
pub struct ProgressReporter {
    mode: ProgressMode,
}

impl ProgressReporter {
    #[must_use]
    pub fn new(robot_mode: bool, quiet: bool) -> Self {
        Self {
            mode: ProgressMode::detect(robot_mode, quiet),
        }
    }

    #[must_use]
    pub const fn with_mode(mode: ProgressMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Create a progress bar for `total` records.
    pub fn progress(&self, total: u64, msg: &str) -> ProgressHandle {
        match self.mode {
            ProgressMode::Quiet => ProgressHandle::Noop,

            ProgressMode::Robot => {
                ProgressEvent::new(ProgressEventType::ProgressStart, msg)
                    .with_progress(0, total)
                    .emit();
                ProgressHandle::Robot {
                    operation: msg.to_string(),
                    total,
                }
            }

            ProgressMode::NonTty => {
                eprintln!("[qbank] {msg} (0/{total})");
                ProgressHandle::NonTty {
                    operation: msg.to_string(),
                }
            }

            ProgressMode::Tty => {
                let pb = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.cyan} {msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                {
                    pb.set_style(style.progress_chars("█▓▒░"));
                }
                pb.set_message(msg.to_string());
                ProgressHandle::Tty(pb)
            }
        }
    }

    /// Log a message (respects quiet mode)
    pub fn log(&self, msg: &str) {
        self.side_message("log", "", msg);
    }

    /// Log a warning (respects quiet mode)
    pub fn warn(&self, msg: &str) {
        self.side_message("warning", "WARN: ", msg);
    }

    fn side_message(&self, kind: &str, prefix: &str, msg: &str) {
        match self.mode {
            ProgressMode::Quiet => {}
            ProgressMode::Robot => {
                let event = serde_json::json!({
                    "type": kind,
                    "message": msg,
                    "timestamp": Utc::now().to_rfc3339(),
                });
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
            ProgressMode::NonTty | ProgressMode::Tty => {
                eprintln!("[qbank] {prefix}{msg}");
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

/// Handle for updating or finishing a progress indicator
pub enum ProgressHandle {
    Tty(ProgressBar),
    NonTty { operation: String },
    Robot { operation: String, total: u64 },
    Noop,
}

impl ProgressHandle {
    /// Finish with a success message
    pub fn finish_with_message(&self, msg: &str) {
        match self {
            Self::Tty(pb) => pb.finish_with_message(format!("✓ {msg}")),
            Self::Robot { operation, .. } => {
                ProgressEvent::new(ProgressEventType::ProgressComplete, operation)
                    .with_message(msg)
                    .emit();
            }
            Self::NonTty { .. } => eprintln!("[qbank] ✓ {msg}"),
            Self::Noop => {}
        }
    }

    /// Abandon with an error message
    pub fn abandon_with_message(&self, msg: &str) {
        match self {
            Self::Tty(pb) => pb.abandon_with_message(format!("✗ {msg}")),
            Self::Robot { operation, .. } => {
                ProgressEvent::new(ProgressEventType::ProgressError, operation)
                    .with_message(msg)
                    .emit();
            }
            Self::NonTty { .. } => eprintln!("[qbank] ✗ ERROR: {msg}"),
            Self::Noop => {}
        }
    }

    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop)
    }
}

impl ImportObserver for ProgressHandle {
    fn on_progress(&mut self, progress: &ImportProgress) {
        let current = progress.current as u64;
        let succeeded = progress.succeeded as u64;
        let failed = progress.failed as u64;
        match self {
            Self::Tty(pb) => {
                pb.set_position(current);
                if failed > 0 {
                    pb.set_message(format!("Importing questions ({failed} failed)"));
                }
            }
            Self::Robot { operation, total } => {
                ProgressEvent::new(ProgressEventType::ProgressUpdate, operation)
                    .with_progress(current, *total)
                    .with_outcome(succeeded, failed)
                    .emit();
            }
            Self::NonTty { operation } => {
                eprintln!(
                    "[qbank] {operation} ({current}/{}, {failed} failed)",
                    progress.total
                );
            }
            Self::Noop => {}
        }
    }
}
