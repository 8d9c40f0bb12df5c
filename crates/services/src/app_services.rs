use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::error::AppServicesError;
use crate::play::PlayService;
use crate::quiz_service::QuizService;

/// Assembles the services the command loop talks to.
#[derive(Clone)]
pub struct AppServices {
    quiz_service: Arc<QuizService>,
    play_service: Arc<PlayService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            quiz_service: Arc::new(QuizService::new(clock, Arc::clone(&storage.quizzes))),
            play_service: Arc::new(PlayService::new(Arc::clone(&storage.quizzes))),
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// With `seed` set, an empty store is filled with the sample quizzes.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or seeding fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        seed: bool,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::from_storage(&storage, clock);
        if seed {
            let inserted = services.quiz_service.seed_samples().await?;
            tracing::info!(inserted, "seeded sample quizzes");
        }
        Ok(services)
    }

    #[must_use]
    pub fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }

    #[must_use]
    pub fn play_service(&self) -> Arc<PlayService> {
        Arc::clone(&self.play_service)
    }
}
