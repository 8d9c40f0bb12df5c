#![forbid(unsafe_code)]

pub mod app_services;
pub mod console;
pub mod error;
pub mod play;
pub mod quiz_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use console::{Console, Emphasis};
pub use error::{AppServicesError, ConsoleError, EmptyPoolError, PlayError, QuizServiceError};
pub use play::{PlayOutcome, PlayService, PlaySession, PlayState, SessionPool, TestOutcome};
pub use quiz_service::{QuizService, SAMPLE_QUIZZES, parse_quiz_id};
