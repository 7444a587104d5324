//! Core domain logic for the quiz tool.
//! This crate is the single source of truth for record and session invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quiz::{Quiz, QuizDraft, QuizId, QuizValidationError};
pub use repo::quiz_repo::{QuizRepository, RepoError, RepoResult, SqliteQuizRepository};
pub use service::quiz_service::{QuizService, DEFAULT_QUIZZES};
pub use session::edit_flow::{EditFlow, FlowError, FlowField, FlowMode, FlowPrompt, FlowStep};
pub use session::play::{PlaySession, RoundOutcome, SessionError, SessionState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
