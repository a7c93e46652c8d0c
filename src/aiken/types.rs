//! Data model produced by the Aiken parser.

use serde::{Deserialize, Serialize};

/// One lettered option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AikenOption {
    /// Uppercase option letter (`A`..=`Z`).
    pub key: char,
    pub text: String,
}

impl AikenOption {
    pub fn new(key: char, text: impl Into<String>) -> Self {
        Self {
            key: key.to_ascii_uppercase(),
            text: text.into(),
        }
    }
}

/// A fully parsed question: prompt, options in source order, and the
/// answer key. `answer` always names one of `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AikenQuestion {
    pub question: String,
    pub options: Vec<AikenOption>,
    pub answer: char,
}

impl AikenQuestion {
    /// The option the answer key points at.
    #[must_use]
    pub fn correct_option(&self) -> Option<&AikenOption> {
        self.options.iter().find(|option| option.key == self.answer)
    }
}

/// Why a line could not be attached to a valid question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    /// Option line with no question in progress.
    OrphanOption,
    /// `ANSWER:` line with no question in progress.
    OrphanAnswer,
    /// `ANSWER:` letter that matches none of the collected options.
    UnknownAnswerKey,
    /// A new prompt arrived before the previous question saw its answer.
    InterruptedQuestion,
    /// Input ended before the question saw its answer.
    UnterminatedQuestion,
}

impl ParseErrorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrphanOption => "orphan_option",
            Self::OrphanAnswer => "orphan_answer",
            Self::UnknownAnswerKey => "unknown_answer_key",
            Self::InterruptedQuestion => "interrupted_question",
            Self::UnterminatedQuestion => "unterminated_question",
        }
    }

    /// Short operator-facing explanation.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::OrphanOption => "option line before any question text",
            Self::OrphanAnswer => "ANSWER line before any question text",
            Self::UnknownAnswerKey => "ANSWER letter does not match any option",
            Self::InterruptedQuestion => "question text not followed by an ANSWER line",
            Self::UnterminatedQuestion => "file ended before the ANSWER line",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded parse error.
///
/// `text` is what lands in [`ParsedResults::error_blocks`]: the offending
/// line for orphan/unknown-key errors, the abandoned prompt for
/// interrupted/unterminated questions. `line` is 1-based and points at the
/// line that carries `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub text: String,
}

/// Tagged outcome of one block of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParsedBlock {
    Question(AikenQuestion),
    Error(ParseError),
}

/// Aggregate of one parse run.
///
/// `error_blocks[i] == errors[i].text` and `failed_count == errors.len()`
/// always hold; the flat fields mirror what the import screen shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedResults {
    pub questions: Vec<AikenQuestion>,
    pub error_blocks: Vec<String>,
    pub failed_count: usize,
    pub errors: Vec<ParseError>,
}

impl ParsedResults {
    /// Fold an ordered block stream into results, preserving order.
    #[must_use]
    pub fn from_blocks(blocks: impl IntoIterator<Item = ParsedBlock>) -> Self {
        let mut results = Self::default();
        for block in blocks {
            match block {
                ParsedBlock::Question(question) => results.questions.push(question),
                ParsedBlock::Error(error) => {
                    results.error_blocks.push(error.text.clone());
                    results.failed_count += 1;
                    results.errors.push(error);
                }
            }
        }
        results
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.failed_count > 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.errors.is_empty()
    }
}
