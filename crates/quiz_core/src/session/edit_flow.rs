//! Two-phase add/edit protocol.
//!
//! The flow first waits for a question, then for an answer, and only then
//! can it be committed. In edit mode both prompts start from the stored
//! values of the record being edited.

use crate::model::quiz::{Quiz, QuizDraft, QuizId};
use crate::repo::quiz_repo::{QuizRepository, RepoError};
use crate::service::quiz_service::QuizService;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whether the flow creates a new record or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    Create,
    Edit(QuizId),
}

/// Which field the flow is currently waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowField {
    Question,
    Answer,
}

/// Prompt the caller should present for the next input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowPrompt {
    pub field: FlowField,
    /// Editable starting text; `None` means a blank prompt.
    pub initial: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FlowPhase {
    AwaitingQuestion,
    AwaitingAnswer { question: String },
    Complete(QuizDraft),
}

/// Result of handing one input to the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStep {
    /// The flow needs another input.
    Next(FlowPrompt),
    /// Both fields captured; the flow can be committed.
    Ready,
}

#[derive(Debug)]
pub enum FlowError {
    /// `commit` was called before both inputs were captured.
    Incomplete,
    /// `submit` was called after both inputs were captured.
    AlreadyComplete,
    Repo(RepoError),
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incomplete => write!(f, "question and answer must both be entered"),
            Self::AlreadyComplete => write!(f, "question and answer were already entered"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FlowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FlowError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Sequential question-then-answer capture for one record.
#[derive(Debug, Clone)]
pub struct EditFlow {
    mode: FlowMode,
    original: Option<QuizDraft>,
    phase: FlowPhase,
}

impl EditFlow {
    /// Starts a create-mode flow with blank prompts.
    pub fn create() -> Self {
        Self {
            mode: FlowMode::Create,
            original: None,
            phase: FlowPhase::AwaitingQuestion,
        }
    }

    /// Starts an edit-mode flow pre-filled from record `id`.
    ///
    /// # Errors
    /// - `FlowError::Repo(RepoError::NotFound)` when `id` is absent.
    pub fn edit<R: QuizRepository>(
        service: &QuizService<R>,
        id: QuizId,
    ) -> Result<Self, FlowError> {
        let quiz = service.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        Ok(Self::edit_from(&quiz))
    }

    /// Starts an edit-mode flow from an already loaded record.
    pub fn edit_from(quiz: &Quiz) -> Self {
        Self {
            mode: FlowMode::Edit(quiz.id),
            original: Some(QuizDraft::new(quiz.question.as_str(), quiz.answer.as_str())),
            phase: FlowPhase::AwaitingQuestion,
        }
    }

    pub fn mode(&self) -> FlowMode {
        self.mode
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, FlowPhase::Complete(_))
    }

    /// Returns the prompt for the pending input, or `None` once complete.
    pub fn prompt(&self) -> Option<FlowPrompt> {
        let field = match self.phase {
            FlowPhase::AwaitingQuestion => FlowField::Question,
            FlowPhase::AwaitingAnswer { .. } => FlowField::Answer,
            FlowPhase::Complete(_) => return None,
        };
        let initial = self.original.as_ref().map(|draft| match field {
            FlowField::Question => draft.question.clone(),
            FlowField::Answer => draft.answer.clone(),
        });
        Some(FlowPrompt { field, initial })
    }

    /// Hands the next user input to the flow.
    pub fn submit(&mut self, input: impl Into<String>) -> Result<FlowStep, FlowError> {
        let input = input.into();
        let next = match std::mem::replace(&mut self.phase, FlowPhase::AwaitingQuestion) {
            FlowPhase::AwaitingQuestion => FlowPhase::AwaitingAnswer { question: input },
            FlowPhase::AwaitingAnswer { question } => {
                FlowPhase::Complete(QuizDraft::new(question, input))
            }
            complete @ FlowPhase::Complete(_) => {
                self.phase = complete;
                return Err(FlowError::AlreadyComplete);
            }
        };
        self.phase = next;

        Ok(match self.prompt() {
            Some(prompt) => FlowStep::Next(prompt),
            None => FlowStep::Ready,
        })
    }

    /// Writes the captured pair through the store and consumes the flow.
    ///
    /// Create mode calls `create`; edit mode calls `update`, which reports
    /// `NotFound` without writing when the record disappeared meanwhile.
    pub fn commit<R: QuizRepository>(self, service: &QuizService<R>) -> Result<Quiz, FlowError> {
        let FlowPhase::Complete(draft) = self.phase else {
            return Err(FlowError::Incomplete);
        };

        let quiz = match self.mode {
            FlowMode::Create => service.create(draft.question, draft.answer)?,
            FlowMode::Edit(id) => service.update(id, draft.question, draft.answer)?,
        };
        Ok(quiz)
    }
}
