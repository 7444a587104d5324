//! Interactive protocols driven one user input at a time.
//!
//! # Responsibility
//! - `edit_flow`: two-phase capture of a question/answer pair for add/edit.
//! - `play`: randomized, non-repeating quiz rounds with scoring.
//!
//! # Invariants
//! - Each protocol advances only when the caller hands in the input it is
//!   waiting for; no step is skipped or reordered.
//! - Nothing is written to the store until a flow is explicitly committed.

pub mod edit_flow;
pub mod play;
