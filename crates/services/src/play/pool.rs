use rand::Rng;
use std::collections::HashSet;

use quiz_core::model::QuizId;

use crate::error::EmptyPoolError;

/// Quiz identifiers not yet asked in the current play session.
///
/// Built from a snapshot of the store; only ever shrinks.
#[derive(Debug, Clone, Default)]
pub struct SessionPool {
    remaining: Vec<QuizId>,
}

impl SessionPool {
    /// Build a pool from the identifiers known at session start, dropping repeats.
    #[must_use]
    pub fn new(ids: impl IntoIterator<Item = QuizId>) -> Self {
        let mut seen = HashSet::new();
        let remaining = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { remaining }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn contains(&self, id: QuizId) -> bool {
        self.remaining.contains(&id)
    }

    /// Remove and return an identifier chosen uniformly among those left.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPoolError` when nothing is left.
    pub fn draw_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<QuizId, EmptyPoolError> {
        if self.remaining.is_empty() {
            return Err(EmptyPoolError);
        }
        let index = rng.random_range(0..self.remaining.len());
        Ok(self.remaining.swap_remove(index))
    }
}
