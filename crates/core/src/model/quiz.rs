use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::answer;
use crate::model::ids::QuizId;

//
// ─── QUIZ TYPES ────────────────────────────────────────────────────────────────
//

/// Question/answer pair as typed by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Validate both fields, collecting every violation rather than stopping at the first.
    ///
    /// Accepted text is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` listing each empty field.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedQuiz, QuizValidationError> {
        let question = self.question.trim();
        let answer = self.answer.trim();

        let mut violations = Vec::new();
        if question.is_empty() {
            violations.push(FieldViolation::EmptyQuestion);
        }
        if answer.is_empty() {
            violations.push(FieldViolation::EmptyAnswer);
        }
        if !violations.is_empty() {
            return Err(QuizValidationError { violations });
        }

        Ok(ValidatedQuiz {
            question: question.to_owned(),
            answer: answer.to_owned(),
            created_at: now,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ValidatedQuiz {
    #[must_use]
    pub fn assign_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// A stored quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Rebuild a quiz from persisted fields, re-checking the text invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if the stored text is empty.
    pub fn from_persisted(
        id: QuizId,
        question: String,
        answer: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, QuizValidationError> {
        let validated = QuizDraft::new(question, answer).validate(created_at)?;
        let mut quiz = validated.assign_id(id);
        quiz.updated_at = updated_at;
        Ok(quiz)
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether `submitted` answers this quiz, using the shared matching rule.
    #[must_use]
    pub fn is_correct(&self, submitted: &str) -> bool {
        answer::matches(submitted, &self.answer)
    }

    /// Replace question and answer, keeping identity and creation time.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` and leaves the quiz untouched if the draft is invalid.
    pub fn revise(
        &mut self,
        draft: QuizDraft,
        now: DateTime<Utc>,
    ) -> Result<(), QuizValidationError> {
        let validated = draft.validate(now)?;
        self.question = validated.question;
        self.answer = validated.answer;
        self.updated_at = now;
        Ok(())
    }
}

//
// ─── QUIZ VALIDATION ERRORS ────────────────────────────────────────────────────
//

/// A single rejected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    EmptyQuestion,
    EmptyAnswer,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldViolation::EmptyQuestion => write!(f, "question must not be empty"),
            FieldViolation::EmptyAnswer => write!(f, "answer must not be empty"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("the quiz is invalid ({} problem(s))", .violations.len())]
pub struct QuizValidationError {
    violations: Vec<FieldViolation>,
}

impl QuizValidationError {
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
