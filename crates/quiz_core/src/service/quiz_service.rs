//! Quiz store use-case service.
//!
//! # Responsibility
//! - Expose the record-store operations used by commands, flows and sessions.
//! - Own startup seeding and single-question answer checks.
//! - Emit metadata-only audit events for every mutation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Logged events never include question or answer text.

use crate::model::quiz::{Quiz, QuizDraft, QuizId};
use crate::repo::quiz_repo::{QuizRepository, RepoError, RepoResult};
use log::{info, warn};

/// Records inserted into an empty store at startup.
pub const DEFAULT_QUIZZES: [(&str, &str); 4] = [
    ("Capital de Italia", "Roma"),
    ("Capital de Francia", "París"),
    ("Capital de España", "Madrid"),
    ("Capital de Portugal", "Lisboa"),
];

/// Use-case facade over a quiz repository.
pub struct QuizService<R: QuizRepository> {
    repo: R,
}

impl<R: QuizRepository> QuizService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Seeds the default capitals when the store has no records.
    ///
    /// Returns the number of inserted records; 0 means seeding was skipped.
    pub fn seed_defaults_if_empty(&self) -> RepoResult<usize> {
        let drafts: Vec<QuizDraft> = DEFAULT_QUIZZES
            .iter()
            .map(|(question, answer)| QuizDraft::new(*question, *answer))
            .collect();
        let inserted = self.repo.seed_if_empty(&drafts)?;
        info!("event=quiz_seed module=service status=ok inserted={inserted}");
        Ok(inserted)
    }

    /// Lists every record in insertion order.
    pub fn list_all(&self) -> RepoResult<Vec<Quiz>> {
        self.repo.list_quizzes()
    }

    pub fn find_by_id(&self, id: QuizId) -> RepoResult<Option<Quiz>> {
        self.repo.get_quiz(id)
    }

    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_quizzes()
    }

    /// Creates one record after validation.
    pub fn create(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> RepoResult<Quiz> {
        let draft = QuizDraft::new(question, answer);
        match self.repo.create_quiz(&draft) {
            Ok(quiz) => {
                info!("event=quiz_create module=service status=ok id={}", quiz.id);
                Ok(quiz)
            }
            Err(err) => {
                warn!(
                    "event=quiz_create module=service status=error error_code={}",
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    /// Replaces both fields of record `id`.
    ///
    /// Returns `NotFound` before any validation when `id` is absent.
    pub fn update(
        &self,
        id: QuizId,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> RepoResult<Quiz> {
        let draft = QuizDraft::new(question, answer);
        match self.repo.update_quiz(id, &draft) {
            Ok(quiz) => {
                info!("event=quiz_update module=service status=ok id={id}");
                Ok(quiz)
            }
            Err(err) => {
                warn!(
                    "event=quiz_update module=service status=error id={id} error_code={}",
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    /// Deletes record `id`; absent ids are a no-op reported as `false`.
    pub fn delete(&self, id: QuizId) -> RepoResult<bool> {
        let removed = self.repo.delete_quiz(id)?;
        info!("event=quiz_delete module=service status=ok id={id} removed={removed}");
        Ok(removed)
    }

    /// Checks one answer against record `id` without touching the store.
    pub fn check_answer(&self, id: QuizId, answer: &str) -> RepoResult<bool> {
        let quiz = self.repo.get_quiz(id)?.ok_or(RepoError::NotFound(id))?;
        Ok(quiz.is_correct(answer))
    }
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Validation(_) => "validation_failed",
        RepoError::NotFound(_) => "not_found",
        RepoError::Db(_) => "db_error",
        RepoError::InvalidData(_) => "invalid_data",
        RepoError::UninitializedConnection { .. } | RepoError::MissingRequiredTable(_) => {
            "uninitialized_connection"
        }
    }
}
