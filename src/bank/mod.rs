//! Question bank side of the import: record conversion, the HTTP client,
//! and the sequential import driver.

pub mod client;
pub mod import;
pub mod record;

pub use client::{CreatedQuestion, QuestionBankClient, interpret_response};
pub use import::{
    ImportObserver, ImportProgress, ImportSummary, NoopObserver, QuestionSink, RecordFailure,
    check_preconditions, convert_all, import_questions,
};
pub use record::{
    Difficulty, FULL_CREDIT, ImportTarget, NAME_MAX_CHARS, NewQuestion, QuestionOption,
    display_name,
};
