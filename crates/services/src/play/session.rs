use rand::Rng;
use std::fmt;

use quiz_core::model::QuizId;

use super::pool::SessionPool;

/// Lifecycle of a play session. Only `Running` accepts further draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Running,
    /// Every quiz was answered correctly, or there was nothing to ask.
    Won,
    /// A wrong answer ended the session.
    Lost,
}

/// Score-keeping state machine behind `play`.
///
/// Draws come from a `SessionPool`; each draw must be followed by
/// `record_answer` before the next one.
pub struct PlaySession {
    pool: SessionPool,
    total: usize,
    score: u32,
    state: PlayState,
    pending: Option<QuizId>,
    asked: Vec<QuizId>,
}

impl PlaySession {
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = QuizId>) -> Self {
        let pool = SessionPool::new(ids);
        Self {
            total: pool.len(),
            pool,
            score: 0,
            state: PlayState::Running,
            pending: None,
            asked: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> PlayState {
        self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of quizzes in the session snapshot.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// Identifiers drawn so far, in draw order.
    #[must_use]
    pub fn asked(&self) -> &[QuizId] {
        &self.asked
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state != PlayState::Running
    }

    /// Draw the next quiz to ask.
    ///
    /// Returns `None` once the session is over; an exhausted pool moves a
    /// running session to `Won`. A draw still awaiting its answer is returned again.
    pub fn next_quiz<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<QuizId> {
        if self.is_over() {
            return None;
        }
        if let Some(id) = self.pending {
            return Some(id);
        }
        match self.pool.draw_random(rng) {
            Ok(id) => {
                self.pending = Some(id);
                self.asked.push(id);
                Some(id)
            }
            Err(_) => {
                self.state = PlayState::Won;
                None
            }
        }
    }

    /// Score the answer to the pending draw and return the resulting state.
    ///
    /// Without a pending draw the state is returned unchanged.
    pub fn record_answer(&mut self, correct: bool) -> PlayState {
        if self.pending.take().is_none() {
            return self.state;
        }
        if correct {
            self.score += 1;
        } else {
            self.state = PlayState::Lost;
        }
        self.state
    }
}

impl fmt::Debug for PlaySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaySession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("total", &self.total)
            .field("remaining", &self.pool.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
