//! Quiz record model and field validation.
//!
//! # Responsibility
//! - Define the canonical question/answer record.
//! - Own the field-level rules shared by create and update paths.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another record.
//! - `question` and `answer` are non-empty (whitespace-only counts as empty).
//! - Text is stored exactly as entered; validation never rewrites it.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned surrogate key for a quiz record.
pub type QuizId = i64;

/// Persisted question/answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: QuizId,
    pub question: String,
    pub answer: String,
}

impl Quiz {
    /// Exact, case-sensitive answer comparison.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.answer == answer
    }
}

/// Unsaved question/answer pair, as captured by the add/edit flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Validates field-level rules that do not need storage access.
    ///
    /// Uniqueness of `question` is checked by the repository, since it
    /// depends on the other stored records.
    pub fn validate(&self) -> Result<(), QuizValidationError> {
        if self.question.trim().is_empty() {
            return Err(QuizValidationError::EmptyQuestion);
        }
        if self.answer.trim().is_empty() {
            return Err(QuizValidationError::EmptyAnswer);
        }
        Ok(())
    }
}

/// Rule violations that block a quiz write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizValidationError {
    EmptyQuestion,
    EmptyAnswer,
    /// Another record already uses this question text.
    DuplicateQuestion(String),
}

impl Display for QuizValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuestion => write!(f, "question cannot be empty"),
            Self::EmptyAnswer => write!(f, "answer cannot be empty"),
            Self::DuplicateQuestion(question) => {
                write!(f, "a quiz with question `{question}` already exists")
            }
        }
    }
}

impl Error for QuizValidationError {}
