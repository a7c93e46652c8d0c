//! Aiken format parser.
//!
//! The format is line oriented:
//!
//! ```text
//! What is 2+2?
//! A. 3
//! B) 4
//! ANSWER: B
//! ```
//!
//! Parsing is a two-state machine. `Idle` means no question is in
//! progress; `Building` holds the prompt and the options collected so far.
//! Each trimmed, non-blank line is classified as an option line, an answer
//! line, or free text, in that priority order. Errors never abort the parse;
//! they are emitted as [`ParsedBlock::Error`] and scanning continues with
//! the next line.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, trace};

use super::normalize::normalize_line_endings;
use super::types::{AikenOption, AikenQuestion, ParseError, ParseErrorKind, ParsedBlock, ParsedResults};

const OPTION_PATTERN: &str = r"^([A-Z])[.)]\s+(.+)$";
const ANSWER_PATTERN: &str = r"(?i)^ANSWER:\s*([A-Z])$";

fn option_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(OPTION_PATTERN).expect("valid regex"))
}

fn answer_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ANSWER_PATTERN).expect("valid regex"))
}

/// Classification of a single trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Option { key: char, text: &'a str },
    Answer { key: char },
    Text(&'a str),
}

/// Classify one line. Leading and trailing whitespace is ignored.
#[must_use]
pub fn classify_line(raw: &str) -> LineKind<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = option_regex().captures(line) {
        let key = caps[1].chars().next().unwrap_or('A').to_ascii_uppercase();
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        return LineKind::Option { key, text };
    }

    if let Some(caps) = answer_regex().captures(line) {
        let key = caps[1].chars().next().unwrap_or('A').to_ascii_uppercase();
        return LineKind::Answer { key };
    }

    LineKind::Text(line)
}

#[derive(Debug)]
enum State {
    Idle,
    Building {
        prompt: String,
        line: usize,
        options: Vec<AikenOption>,
    },
}

/// Parser for Aiken-format question banks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AikenParser;

impl AikenParser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Parse raw text (any line-ending convention) into results.
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedResults {
        let results = ParsedResults::from_blocks(self.parse_blocks(text));
        debug!(
            questions = results.questions.len(),
            failed = results.failed_count,
            "Parsed Aiken input"
        );
        results
    }

    /// Parse raw text into an ordered stream of questions and errors.
    #[must_use]
    pub fn parse_blocks(&self, text: &str) -> Vec<ParsedBlock> {
        let normalized = normalize_line_endings(text);
        let mut blocks = Vec::new();
        let mut state = State::Idle;

        for (idx, raw) in normalized.split('\n').enumerate() {
            let line_no = idx + 1;
            let kind = classify_line(raw);
            trace!(line = line_no, kind = ?kind, "classified line");

            state = match (state, kind) {
                (state, LineKind::Blank) => state,

                (State::Idle, LineKind::Option { .. }) => {
                    blocks.push(error(ParseErrorKind::OrphanOption, line_no, raw.trim()));
                    State::Idle
                }
                (
                    State::Building {
                        prompt,
                        line,
                        mut options,
                    },
                    LineKind::Option { key, text },
                ) => {
                    options.push(AikenOption::new(key, text));
                    State::Building {
                        prompt,
                        line,
                        options,
                    }
                }

                (State::Idle, LineKind::Answer { .. }) => {
                    blocks.push(error(ParseErrorKind::OrphanAnswer, line_no, raw.trim()));
                    State::Idle
                }
                (
                    State::Building {
                        prompt, options, ..
                    },
                    LineKind::Answer { key },
                ) => {
                    if options.iter().any(|option| option.key == key) {
                        blocks.push(ParsedBlock::Question(AikenQuestion {
                            question: prompt,
                            options,
                            answer: key,
                        }));
                    } else {
                        debug!(line = line_no, answer = %key, "answer key matches no option");
                        blocks.push(error(ParseErrorKind::UnknownAnswerKey, line_no, raw.trim()));
                    }
                    State::Idle
                }

                (State::Idle, LineKind::Text(text)) => State::Building {
                    prompt: text.to_string(),
                    line: line_no,
                    options: Vec::new(),
                },
                (State::Building { prompt, line, .. }, LineKind::Text(text)) => {
                    // The abandoned options are not recorded; only the prompt is.
                    blocks.push(error(ParseErrorKind::InterruptedQuestion, line, &prompt));
                    State::Building {
                        prompt: text.to_string(),
                        line: line_no,
                        options: Vec::new(),
                    }
                }
            };
        }

        if let State::Building { prompt, line, .. } = state {
            blocks.push(error(ParseErrorKind::UnterminatedQuestion, line, &prompt));
        }

        blocks
    }
}

fn error(kind: ParseErrorKind, line: usize, text: &str) -> ParsedBlock {
    ParsedBlock::Error(ParseError {
        kind,
        line,
        text: text.to_string(),
    })
}

/// Parse Aiken text with the default parser.
#[must_use]
pub fn parse_aiken(text: &str) -> ParsedResults {
    AikenParser::new().parse(text)
}
