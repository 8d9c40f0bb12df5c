use std::sync::Arc;

use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::{NewQuizRecord, QuizRepository, StorageError};

use crate::Clock;
use crate::error::QuizServiceError;

/// Question/answer pairs inserted by `seed_samples` into an empty store.
pub const SAMPLE_QUIZZES: [(&str, &str); 4] = [
    ("Capital of Italy", "Rome"),
    ("Capital of France", "Paris"),
    ("Capital of Spain", "Madrid"),
    ("Capital of Portugal", "Lisbon"),
];

/// Parse the `<id>` argument of a command.
///
/// # Errors
///
/// Returns `QuizServiceError::MissingIdentifier` when no (or a blank) argument is given,
/// `QuizServiceError::InvalidIdentifier` when it is not a non-negative integer.
pub fn parse_quiz_id(raw: Option<&str>) -> Result<QuizId, QuizServiceError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(QuizServiceError::MissingIdentifier)?;
    Ok(raw.parse::<QuizId>()?)
}

/// Orchestrates quiz creation, edits and removal.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// List every quiz ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.quizzes.list_quizzes().await?)
    }

    /// Fetch one quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::RecordNotFound` when the quiz does not exist.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Quiz, QuizServiceError> {
        self.quizzes
            .get_quiz(id)
            .await?
            .ok_or(QuizServiceError::RecordNotFound(id))
    }

    /// Validate and persist a new quiz, returning it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` for empty fields.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, QuizServiceError> {
        let validated = draft.validate(self.clock.now())?;
        let id = self
            .quizzes
            .insert_new_quiz(NewQuizRecord::from_validated(&validated))
            .await?;
        tracing::info!(%id, "created quiz");
        Ok(validated.assign_id(id))
    }

    /// Replace the question and answer of an existing quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::RecordNotFound` when the quiz does not exist.
    /// Returns `QuizServiceError::Validation` for empty fields.
    pub async fn update_quiz(
        &self,
        id: QuizId,
        draft: QuizDraft,
    ) -> Result<Quiz, QuizServiceError> {
        let mut quiz = self.get_quiz(id).await?;
        quiz.revise(draft, self.clock.now())?;
        // The quiz may be deleted between the read above and this write.
        self.quizzes.update_quiz(&quiz).await.map_err(|e| match e {
            StorageError::NotFound => QuizServiceError::RecordNotFound(id),
            other => other.into(),
        })?;
        tracing::info!(%id, "updated quiz");
        Ok(quiz)
    }

    /// Remove a quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::RecordNotFound` when there was nothing to delete.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        if !self.quizzes.delete_quiz(id).await? {
            return Err(QuizServiceError::RecordNotFound(id));
        }
        tracing::info!(%id, "deleted quiz");
        Ok(())
    }

    /// Insert `SAMPLE_QUIZZES` when the store holds no quiz yet.
    ///
    /// Returns how many quizzes were inserted.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError` if listing or inserting fails.
    pub async fn seed_samples(&self) -> Result<usize, QuizServiceError> {
        if !self.quizzes.list_quizzes().await?.is_empty() {
            return Ok(0);
        }
        for (question, answer) in SAMPLE_QUIZZES {
            self.create_quiz(QuizDraft::new(question, answer)).await?;
        }
        Ok(SAMPLE_QUIZZES.len())
    }
}
