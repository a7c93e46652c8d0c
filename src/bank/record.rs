//! Conversion from parsed Aiken questions to question-bank API records.

use serde::{Deserialize, Serialize};

use crate::aiken::AikenQuestion;
use crate::error::{QbError, Result};

/// Maximum display-name length, in characters, before truncation.
pub const NAME_MAX_CHARS: usize = 50;

/// Grade awarded for the option matching the answer key.
pub const FULL_CREDIT: u8 = 100;

/// Question difficulty accepted by the question bank.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = QbError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QbError::Config(format!(
                "invalid difficulty {value} (expected easy|medium|hard)"
            ))),
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = QbError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Where and how imported questions are filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportTarget {
    pub folder_id: String,
    pub difficulty: Difficulty,
    pub default_mark: f64,
}

impl ImportTarget {
    pub fn new(folder_id: impl Into<String>, difficulty: Difficulty, default_mark: f64) -> Self {
        Self {
            folder_id: folder_id.into(),
            difficulty,
            default_mark,
        }
    }
}

/// Question type marker understood by the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    #[serde(rename = "MCQ")]
    Mcq,
}

/// Lifecycle status of a created question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionStatus {
    Draft,
}

/// One scored option in the question bank's model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub text: String,
    pub grade: u8,
    pub feedback: String,
}

/// Payload of a create-question request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub name: String,
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub status: QuestionStatus,
    pub folder_id: String,
    pub difficulty: Difficulty,
    pub default_mark: f64,
    pub is_multiple: bool,
    pub options: Vec<QuestionOption>,
}

impl NewQuestion {
    /// Build a single-select draft MCQ record from a parsed question.
    #[must_use]
    pub fn from_aiken(question: &AikenQuestion, target: &ImportTarget) -> Self {
        let options = question
            .options
            .iter()
            .map(|option| QuestionOption {
                text: option.text.clone(),
                grade: if option.key == question.answer {
                    FULL_CREDIT
                } else {
                    0
                },
                feedback: String::new(),
            })
            .collect();

        Self {
            name: display_name(&question.question),
            question_text: question.question.clone(),
            question_type: QuestionType::Mcq,
            status: QuestionStatus::Draft,
            folder_id: target.folder_id.clone(),
            difficulty: target.difficulty,
            default_mark: target.default_mark,
            is_multiple: false,
            options,
        }
    }
}

/// Display name for a prompt: the first 50 characters, with `...` appended
/// when the prompt was longer.
#[must_use]
pub fn display_name(prompt: &str) -> String {
    if prompt.chars().count() > NAME_MAX_CHARS {
        let head: String = prompt.chars().take(NAME_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        prompt.to_string()
    }
}
