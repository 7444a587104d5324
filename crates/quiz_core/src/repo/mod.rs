//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record-store contract consumed by services and flows.
//! - Isolate SQLite query details from quiz orchestration.
//!
//! # Invariants
//! - Write paths validate before any SQL mutation.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to DB transport errors.

pub mod quiz_repo;
