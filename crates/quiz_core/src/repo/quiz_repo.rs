//! Quiz repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete over the `quizzes` table.
//! - Enforce non-empty fields and question uniqueness before writing.
//!
//! # Invariants
//! - Every mutation runs inside one immediate transaction; a failed check
//!   rolls back with no partial write.
//! - `update_quiz` replaces question and answer in a single statement.
//! - `delete_quiz` is idempotent.
//! - Listing is ordered by `id ASC` (insertion order).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::quiz::{Quiz, QuizDraft, QuizId, QuizValidationError};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUIZ_SELECT_SQL: &str = "SELECT id, question, answer FROM quizzes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quiz persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(QuizValidationError),
    Db(DbError),
    NotFound(QuizId),
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quiz not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quiz data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table missing: {table}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuizValidationError> for RepoError {
    fn from(value: QuizValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record-store contract for quiz CRUD operations.
pub trait QuizRepository {
    /// Returns every record in insertion order.
    fn list_quizzes(&self) -> RepoResult<Vec<Quiz>>;
    /// Returns one record, or `None` when the id is absent.
    fn get_quiz(&self, id: QuizId) -> RepoResult<Option<Quiz>>;
    fn create_quiz(&self, draft: &QuizDraft) -> RepoResult<Quiz>;
    /// Replaces both fields of an existing record.
    fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> RepoResult<Quiz>;
    /// Removes a record; returns whether a row was actually deleted.
    fn delete_quiz(&self, id: QuizId) -> RepoResult<bool>;
    fn count_quizzes(&self) -> RepoResult<u64>;
    /// Inserts `drafts` in one transaction only when the table is empty.
    ///
    /// Returns the number of inserted records (0 when skipped).
    fn seed_if_empty(&self, drafts: &[QuizDraft]) -> RepoResult<usize>;
}

/// SQLite-backed quiz repository.
pub struct SqliteQuizRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuizRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when `quizzes` does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_quiz_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl QuizRepository for SqliteQuizRepository<'_> {
    fn list_quizzes(&self) -> RepoResult<Vec<Quiz>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUIZ_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut quizzes = Vec::new();

        while let Some(row) = rows.next()? {
            quizzes.push(parse_quiz_row(row)?);
        }

        Ok(quizzes)
    }

    fn get_quiz(&self, id: QuizId) -> RepoResult<Option<Quiz>> {
        load_quiz(self.conn, id)
    }

    fn create_quiz(&self, draft: &QuizDraft) -> RepoResult<Quiz> {
        draft.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        ensure_question_free(&tx, &draft.question, None)?;
        tx.execute(
            "INSERT INTO quizzes (question, answer) VALUES (?1, ?2);",
            params![draft.question.as_str(), draft.answer.as_str()],
        )
        .map_err(|err| map_write_error(err, &draft.question))?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        Ok(Quiz {
            id,
            question: draft.question.clone(),
            answer: draft.answer.clone(),
        })
    }

    fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> RepoResult<Quiz> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if load_quiz(&tx, id)?.is_none() {
            return Err(RepoError::NotFound(id));
        }

        draft.validate()?;
        ensure_question_free(&tx, &draft.question, Some(id))?;

        let changed = tx
            .execute(
                "UPDATE quizzes
                 SET
                    question = ?1,
                    answer = ?2,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE id = ?3;",
                params![draft.question.as_str(), draft.answer.as_str(), id],
            )
            .map_err(|err| map_write_error(err, &draft.question))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        tx.commit()?;

        Ok(Quiz {
            id,
            question: draft.question.clone(),
            answer: draft.answer.clone(),
        })
    }

    fn delete_quiz(&self, id: QuizId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM quizzes WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn count_quizzes(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quizzes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative quiz count `{count}`")))
    }

    fn seed_if_empty(&self, drafts: &[QuizDraft]) -> RepoResult<usize> {
        for draft in drafts {
            draft.validate()?;
        }

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row("SELECT COUNT(*) FROM quizzes;", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        {
            let mut stmt = tx.prepare("INSERT INTO quizzes (question, answer) VALUES (?1, ?2);")?;
            for draft in drafts {
                stmt.execute(params![draft.question.as_str(), draft.answer.as_str()])
                    .map_err(|err| map_write_error(err, &draft.question))?;
            }
        }
        tx.commit()?;

        Ok(drafts.len())
    }
}

fn load_quiz(conn: &Connection, id: QuizId) -> RepoResult<Option<Quiz>> {
    let mut stmt = conn.prepare(&format!("{QUIZ_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_quiz_row(row)?));
    }

    Ok(None)
}

/// Rejects `question` when another record (other than `exclude`) uses it.
fn ensure_question_free(
    conn: &Connection,
    question: &str,
    exclude: Option<QuizId>,
) -> RepoResult<()> {
    let owner: Option<QuizId> = conn
        .query_row(
            "SELECT id FROM quizzes WHERE question = ?1;",
            [question],
            |row| row.get(0),
        )
        .optional()?;

    match owner {
        Some(owner_id) if Some(owner_id) != exclude => Err(RepoError::Validation(
            QuizValidationError::DuplicateQuestion(question.to_string()),
        )),
        _ => Ok(()),
    }
}

fn map_write_error(err: rusqlite::Error, question: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::Validation(QuizValidationError::DuplicateQuestion(question.to_string()))
        }
        _ => err.into(),
    }
}

fn parse_quiz_row(row: &Row<'_>) -> RepoResult<Quiz> {
    let quiz = Quiz {
        id: row.get("id")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
    };

    QuizDraft::new(quiz.question.as_str(), quiz.answer.as_str())
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("quiz {}: {err}", quiz.id)))?;
    Ok(quiz)
}

fn ensure_quiz_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'quizzes'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::MissingRequiredTable("quizzes"));
    }

    Ok(())
}
