use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quiz_core::model::{Quiz, QuizId};
use storage::repository::QuizRepository;

use super::session::{PlaySession, PlayState};
use crate::console::{Console, Emphasis};
use crate::error::PlayError;
use crate::quiz_service::parse_quiz_id;

/// Final state of a play session that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub state: PlayState,
    pub score: u32,
    pub total: usize,
}

/// Result of a single-quiz test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestOutcome {
    pub quiz_id: QuizId,
    pub is_correct: bool,
}

/// Runs `play` sessions and single-quiz tests against the quiz store.
#[derive(Clone)]
pub struct PlayService {
    quizzes: Arc<dyn QuizRepository>,
}

impl PlayService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { quizzes }
    }

    /// Ask every stored quiz once, in random order, until one is missed.
    ///
    /// The set of quizzes is captured when the session starts.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::RecordNotFound` if a quiz from the snapshot is gone when drawn.
    /// Returns `PlayError::Console` if input closes mid-session, or `PlayError::Storage`.
    pub async fn run_play_session(
        &self,
        console: &mut dyn Console,
    ) -> Result<PlayOutcome, PlayError> {
        let snapshot = self.quizzes.list_quizzes().await?;
        let mut session = PlaySession::new(snapshot.iter().map(Quiz::id));
        let mut rng = StdRng::from_os_rng();
        tracing::info!(total = session.total(), "play session started");

        while let Some(id) = session.next_quiz(&mut rng) {
            let Some(quiz) = self.quizzes.get_quiz(id).await? else {
                tracing::warn!(%id, "quiz removed during play session");
                return Err(PlayError::RecordNotFound(id));
            };

            let reply = console.prompt_line(&question_prompt(&quiz)).await?;
            let correct = quiz.is_correct(&reply);
            tracing::debug!(%id, correct, "answer checked");

            match session.record_answer(correct) {
                PlayState::Running => {
                    console.report_line(&format!("CORRECT - Score: {}", session.score()));
                }
                _ => {
                    console.report_line(&format!(
                        "INCORRECT - Game over. Score: {}",
                        session.score()
                    ));
                    console.report_emphasized(&session.score().to_string(), Emphasis::Score);
                }
            }
        }

        if session.state() == PlayState::Won {
            if session.total() == 0 {
                console.report_line("There are no quizzes to ask.");
            } else {
                console.report_line("Nothing more to ask.");
            }
            console.report_line(&format!("Game over. Score: {}", session.score()));
            console.report_emphasized(&session.score().to_string(), Emphasis::Score);
        }

        let outcome = PlayOutcome {
            state: session.state(),
            score: session.score(),
            total: session.total(),
        };
        tracing::info!(?outcome, "play session finished");
        Ok(outcome)
    }

    /// Ask the quiz identified by `raw_id` once.
    ///
    /// # Errors
    ///
    /// Returns `PlayError::Quiz` for a missing or malformed id,
    /// `PlayError::RecordNotFound` when no quiz has that id.
    pub async fn run_single_test(
        &self,
        console: &mut dyn Console,
        raw_id: Option<&str>,
    ) -> Result<TestOutcome, PlayError> {
        let id = parse_quiz_id(raw_id)?;
        let quiz = self
            .quizzes
            .get_quiz(id)
            .await?
            .ok_or(PlayError::RecordNotFound(id))?;

        let reply = console.prompt_line(&question_prompt(&quiz)).await?;
        let is_correct = quiz.is_correct(&reply);
        if is_correct {
            console.report_line("Your answer is correct.");
            console.report_emphasized("Correct", Emphasis::Success);
        } else {
            console.report_line("Your answer is incorrect.");
            console.report_emphasized("Incorrect", Emphasis::Failure);
        }

        Ok(TestOutcome {
            quiz_id: id,
            is_correct,
        })
    }
}

/// The question as asked: always ends in `? ` without doubling a trailing `?`.
fn question_prompt(quiz: &Quiz) -> String {
    let question = quiz.question();
    if question.ends_with('?') {
        format!("{question} ")
    } else {
        format!("{question}? ")
    }
}
