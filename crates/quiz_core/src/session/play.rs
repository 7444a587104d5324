//! Randomized quiz session engine.
//!
//! # Invariants
//! - The pool is a snapshot taken when the session is built; later store
//!   mutations do not affect it.
//! - Each record is asked at most once per session: it leaves the pool as
//!   soon as it is answered, right or wrong.
//! - Every draw is uniform over the pool size at that moment.
//! - `Won` and `Lost` are terminal.

use crate::model::quiz::Quiz;
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Built but not started.
    Idle,
    /// One question is presented and awaiting an answer.
    Asking,
    /// Pool exhausted without a mistake.
    Won,
    /// Most recent answer was incorrect.
    Lost,
}

impl SessionState {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NotIdle(SessionState),
    NotAsking(SessionState),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotIdle(state) => write!(f, "session already started (state {state:?})"),
            Self::NotAsking(state) => write!(f, "no question is pending (state {state:?})"),
        }
    }
}

impl Error for SessionError {}

/// Result of answering one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub correct: bool,
    /// Stored answer of the question just asked.
    pub expected: String,
    /// Correct answers so far, including this round.
    pub score: u32,
    /// State after this round: `Asking`, `Won` or `Lost`.
    pub state: SessionState,
}

/// One play-through over a snapshot of records.
pub struct PlaySession<G: Rng> {
    pool: Vec<Quiz>,
    current: Option<Quiz>,
    score: u32,
    state: SessionState,
    rng: G,
}

impl<G: Rng> PlaySession<G> {
    /// Builds an idle session over `snapshot`, drawing with `rng`.
    pub fn new(snapshot: Vec<Quiz>, rng: G) -> Self {
        Self {
            pool: snapshot,
            current: None,
            score: 0,
            state: SessionState::Idle,
            rng,
        }
    }

    /// Presents the first question, or finishes as `Won` on an empty pool.
    pub fn start(&mut self) -> Result<SessionState, SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::NotIdle(self.state));
        }

        info!(
            "event=play_session module=session status=start pool_size={}",
            self.pool.len()
        );
        self.advance();
        Ok(self.state)
    }

    /// Question text of the pending round, if any.
    pub fn current_question(&self) -> Option<&str> {
        self.current.as_ref().map(|quiz| quiz.question.as_str())
    }

    /// Answers the pending question.
    ///
    /// The asked record is dropped from the pool before comparing. A correct
    /// answer scores and draws the next question; a wrong one ends the
    /// session as `Lost`.
    pub fn answer(&mut self, answer: &str) -> Result<RoundOutcome, SessionError> {
        let quiz = match (self.state, self.current.take()) {
            (SessionState::Asking, Some(quiz)) => quiz,
            (state, _) => return Err(SessionError::NotAsking(state)),
        };

        let correct = quiz.is_correct(answer);
        if correct {
            self.score += 1;
            self.advance();
        } else {
            self.state = SessionState::Lost;
            self.log_finish();
        }

        Ok(RoundOutcome {
            correct,
            expected: quiz.answer,
            score: self.score,
            state: self.state,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Records not yet asked (the pending question excluded).
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    fn advance(&mut self) {
        if self.pool.is_empty() {
            self.state = SessionState::Won;
            self.log_finish();
            return;
        }

        let index = self.rng.gen_range(0..self.pool.len());
        self.current = Some(self.pool.swap_remove(index));
        self.state = SessionState::Asking;
    }

    fn log_finish(&self) {
        info!(
            "event=play_session module=session status=finished outcome={:?} score={}",
            self.state, self.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{PlaySession, SessionError, SessionState};
    use crate::model::quiz::Quiz;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn quiz(id: i64, question: &str, answer: &str) -> Quiz {
        Quiz {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    fn numbered_pool(size: i64) -> Vec<Quiz> {
        (1..=size)
            .map(|n| quiz(n, &format!("q{n}"), &format!("a{n}")))
            .collect()
    }

    #[test]
    fn empty_pool_wins_immediately_with_zero_score() {
        let mut session = PlaySession::new(Vec::new(), StdRng::seed_from_u64(1));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.start().unwrap(), SessionState::Won);
        assert_eq!(session.score(), 0);
        assert!(session.current_question().is_none());
    }

    #[test]
    fn every_record_is_asked_exactly_once_when_winning() {
        for seed in 0..20 {
            let mut session = PlaySession::new(numbered_pool(6), StdRng::seed_from_u64(seed));
            session.start().unwrap();
            let mut asked = HashSet::new();

            while session.state() == SessionState::Asking {
                let question = session.current_question().unwrap().to_string();
                assert!(asked.insert(question.clone()), "{question} asked twice");
                let answer = question.replacen('q', "a", 1);
                let outcome = session.answer(&answer).unwrap();
                assert!(outcome.correct);
            }

            assert_eq!(session.state(), SessionState::Won);
            assert_eq!(session.score(), 6);
            assert_eq!(asked.len(), 6);
        }
    }

    #[test]
    fn wrong_answer_loses_with_prior_score() {
        let mut session = PlaySession::new(numbered_pool(5), StdRng::seed_from_u64(42));
        session.start().unwrap();

        for expected_score in 1..=2 {
            let question = session.current_question().unwrap().to_string();
            let outcome = session.answer(&question.replacen('q', "a", 1)).unwrap();
            assert_eq!(outcome.score, expected_score);
            assert_eq!(outcome.state, SessionState::Asking);
        }

        let outcome = session.answer("definitely wrong").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.state, SessionState::Lost);
        assert_eq!(outcome.score, 2);
        assert_eq!(session.remaining(), 2);
    }

    #[test]
    fn comparison_is_exact_and_case_sensitive() {
        let mut session = PlaySession::new(
            vec![quiz(1, "Capital de Italia", "Roma")],
            StdRng::seed_from_u64(3),
        );
        session.start().unwrap();
        let outcome = session.answer("roma").unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.expected, "Roma");
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn draws_cover_every_position_of_the_pool() {
        let mut first_questions = HashSet::new();
        for seed in 0..200 {
            let mut session = PlaySession::new(numbered_pool(4), StdRng::seed_from_u64(seed));
            session.start().unwrap();
            first_questions.insert(session.current_question().unwrap().to_string());
        }
        assert_eq!(first_questions.len(), 4);
    }

    #[test]
    fn answering_outside_asking_is_rejected() {
        let mut session = PlaySession::new(numbered_pool(1), StdRng::seed_from_u64(9));
        assert_eq!(
            session.answer("a1"),
            Err(SessionError::NotAsking(SessionState::Idle))
        );

        session.start().unwrap();
        assert_eq!(
            session.start(),
            Err(SessionError::NotIdle(SessionState::Asking))
        );
        session.answer("a1").unwrap();
        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(
            session.answer("a1"),
            Err(SessionError::NotAsking(SessionState::Won))
        );
    }

    #[test]
    fn only_won_and_lost_are_finished() {
        assert!(!SessionState::Idle.is_finished());
        assert!(!SessionState::Asking.is_finished());
        assert!(SessionState::Won.is_finished());
        assert!(SessionState::Lost.is_finished());

        let mut session = PlaySession::new(numbered_pool(2), StdRng::seed_from_u64(5));
        session.start().unwrap();
        assert!(!session.state().is_finished());
        session.answer("wrong").unwrap();
        assert!(session.state().is_finished());
    }
}
