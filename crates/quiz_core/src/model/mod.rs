//! Domain model for question/answer records.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `QuizId`.
//! - Question and answer text is never empty once persisted.

pub mod quiz;
