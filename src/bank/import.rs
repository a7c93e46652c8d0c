//! Sequential import of parsed questions into a question bank.
//!
//! Records are submitted one at a time, in input order. A failed record is
//! collected in the summary and the run continues with the next one.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aiken::AikenQuestion;
use crate::error::{QbError, Result};

use super::client::CreatedQuestion;
use super::record::{ImportTarget, NewQuestion};

/// Destination for converted question records.
pub trait QuestionSink {
    /// Create one question. Any error counts as a failure for that record.
    fn create_question(&mut self, record: &NewQuestion) -> Result<CreatedQuestion>;
}

/// Receives a progress update after every attempted record.
pub trait ImportObserver {
    fn on_progress(&mut self, progress: &ImportProgress);
}

/// Observer that ignores all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ImportObserver for NoopObserver {
    fn on_progress(&mut self, _progress: &ImportProgress) {}
}

/// Progress snapshot; `current` is the 1-based index of the record just attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub current: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// A record the sink rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    /// Zero-based position in the input.
    pub index: usize,
    pub name: String,
    pub message: String,
}

/// Outcome of a whole import run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub created_ids: Vec<String>,
    pub failures: Vec<RecordFailure>,
}

impl ImportSummary {
    /// True when at least one question was created.
    #[must_use]
    pub const fn had_effect(&self) -> bool {
        self.succeeded > 0
    }
}

/// Convert every question for `target`, preserving order.
#[must_use]
pub fn convert_all(questions: &[AikenQuestion], target: &ImportTarget) -> Vec<NewQuestion> {
    questions
        .iter()
        .map(|q| NewQuestion::from_aiken(q, target))
        .collect()
}

/// Check the batch preconditions without touching the sink.
pub fn check_preconditions(questions: &[AikenQuestion], target: &ImportTarget) -> Result<()> {
    if questions.is_empty() {
        return Err(QbError::Precondition(
            "no valid questions to import".to_string(),
        ));
    }
    if target.folder_id.trim().is_empty() {
        return Err(QbError::Precondition("no target folder selected".to_string()));
    }
    Ok(())
}

/// Import `questions` into `sink`, one record at a time.
///
/// Refuses before the first call when there is nothing to import or no
/// folder was chosen. Per-record failures never abort the run.
pub fn import_questions<S, O>(
    sink: &mut S,
    questions: &[AikenQuestion],
    target: &ImportTarget,
    observer: &mut O,
) -> Result<ImportSummary>
where
    S: QuestionSink + ?Sized,
    O: ImportObserver + ?Sized,
{
    check_preconditions(questions, target)?;

    let total = questions.len();
    let mut summary = ImportSummary {
        total,
        ..ImportSummary::default()
    };
    info!(
        total,
        folder_id = %target.folder_id,
        difficulty = %target.difficulty,
        "Starting import"
    );

    for (index, question) in questions.iter().enumerate() {
        let record = NewQuestion::from_aiken(question, target);
        match sink.create_question(&record) {
            Ok(created) => {
                summary.succeeded += 1;
                debug!(
                    index,
                    name = %record.name,
                    id = created.id.as_deref().unwrap_or("-"),
                    "Question created"
                );
                if let Some(id) = created.id {
                    summary.created_ids.push(id);
                }
            }
            Err(err) => {
                summary.failed += 1;
                warn!(index, name = %record.name, error = %err, "Question import failed");
                summary.failures.push(RecordFailure {
                    index,
                    name: record.name,
                    message: err.to_string(),
                });
            }
        }

        observer.on_progress(&ImportProgress {
            current: index + 1,
            total,
            succeeded: summary.succeeded,
            failed: summary.failed,
        });
    }

    info!(
        total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Import finished"
    );
    Ok(summary)
}
