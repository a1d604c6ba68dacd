use std::sync::Arc;

use learn_core::LearningConfig;
use learn_core::model::Catalog;
use storage::repository::Storage;

use crate::Clock;
use crate::auth::{LocalSessionProvider, SessionProvider, SignOutService};
use crate::curriculum::finance_curriculum;
use crate::error::AppServicesError;
use crate::progress_store::ProgressStore;

/// Assembles the app-facing services around one hydrated progress store.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    config: LearningConfig,
    progress: Arc<ProgressStore>,
    sessions: Arc<dyn SessionProvider>,
    sign_out: Arc<SignOutService>,
    clock: Clock,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// bundled curriculum is invalid.
    pub async fn new_sqlite(
        db_url: &str,
        config: LearningConfig,
        learner_name: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let sessions: Arc<dyn SessionProvider> =
            Arc::new(LocalSessionProvider::new(learner_name, clock));
        Ok(Self::from_parts(storage, config, sessions)
            .await?
            .with_clock(clock))
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled curriculum is invalid.
    pub async fn in_memory(
        config: LearningConfig,
        learner_name: &str,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let sessions: Arc<dyn SessionProvider> =
            Arc::new(LocalSessionProvider::new(learner_name, clock));
        Ok(Self::from_parts(Storage::in_memory(), config, sessions)
            .await?
            .with_clock(clock))
    }

    /// Build services over caller-provided storage and session provider.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the bundled curriculum is invalid.
    pub async fn from_parts(
        storage: Storage,
        config: LearningConfig,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(finance_curriculum()?);
        let progress = Arc::new(
            ProgressStore::open(Arc::clone(&catalog), Arc::clone(&storage.progress), &config)
                .await,
        );
        let sign_out = Arc::new(SignOutService::new(
            Arc::clone(&sessions),
            Arc::clone(&progress),
        ));

        tracing::info!(
            modules = catalog.modules().len(),
            lessons = catalog.total_lessons(),
            pass_threshold = config.quiz().pass_threshold(),
            "learning services ready"
        );

        Ok(Self {
            catalog,
            config,
            progress,
            sessions,
            sign_out,
            clock: Clock::System,
        })
    }

    /// Replaces the wall clock used for display (system time by default).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn config(&self) -> LearningConfig {
        self.config
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<dyn SessionProvider> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn sign_out(&self) -> Arc<SignOutService> {
        Arc::clone(&self.sign_out)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }
}
