use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use learn_core::LearningConfig;
use learn_core::model::{
    Catalog, LearnerProgress, LessonId, Module, ModuleId, QuestionId, QuizPolicy, QuizState,
};
use storage::repository::{ProgressRepository, StorageError};
use tokio::runtime::Handle;

use crate::error::ProgressError;
use crate::persistence::{PersistScheduler, Snapshot};

struct StoreState {
    progress: LearnerProgress,
    revision: u64,
}

/// Single owner of the learner's progress.
///
/// A store only exists after hydration: `open` loads the persisted record
/// before handing out the store, so no mutation can race a late load.
/// Mutations apply synchronously in call order; durable writes are debounced
/// and best-effort.
pub struct ProgressStore {
    catalog: Arc<Catalog>,
    policy: QuizPolicy,
    state: Mutex<StoreState>,
    persister: PersistScheduler,
    runtime: Handle,
}

impl ProgressStore {
    /// Hydrates from `repo` and starts the background writer.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn open(
        catalog: Arc<Catalog>,
        repo: Arc<dyn ProgressRepository>,
        config: &LearningConfig,
    ) -> Self {
        let progress = hydrate(repo.as_ref()).await;
        let persister =
            PersistScheduler::spawn(repo, config.persist_debounce(), progress.clone());
        Self {
            catalog,
            policy: config.quiz(),
            state: Mutex::new(StoreState {
                progress,
                revision: 0,
            }),
            persister,
            runtime: Handle::current(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    #[must_use]
    pub fn policy(&self) -> QuizPolicy {
        self.policy
    }

    /// Copy of the current in-memory progress.
    #[must_use]
    pub fn snapshot(&self) -> LearnerProgress {
        self.lock().progress.clone()
    }

    //
    // ─── MUTATIONS ─────────────────────────────────────────────────────────────
    //

    /// Marks a lesson complete. Returns `Ok(false)` if it already was.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownLesson` for lessons outside the catalog.
    pub fn complete_lesson(&self, lesson_id: &LessonId) -> Result<bool, ProgressError> {
        if !self.catalog.contains_lesson(lesson_id) {
            return Err(self.reject(ProgressError::UnknownLesson(lesson_id.clone())));
        }

        let mut state = self.lock();
        let added = state.progress.complete_lesson(lesson_id.clone());
        if added {
            tracing::debug!(lesson = %lesson_id, "lesson completed");
            self.commit(&mut state);
        }
        Ok(added)
    }

    /// Records an answer for a question of `module_id`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the module, question or option is unknown, or
    /// `ProgressError::Quiz` while the quiz is submitted.
    pub fn select_quiz_option(
        &self,
        module_id: &ModuleId,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<(), ProgressError> {
        let module = self.module(module_id)?;
        let question = module.question(question_id).ok_or_else(|| {
            self.reject(ProgressError::UnknownQuestion {
                module: module_id.clone(),
                question: question_id.clone(),
            })
        })?;
        if option_index >= question.options().len() {
            return Err(self.reject(ProgressError::OptionOutOfRange {
                question: question_id.clone(),
                option: option_index,
                options: question.options().len(),
            }));
        }

        let mut state = self.lock();
        state
            .progress
            .select_quiz_option(module_id, question_id.clone(), option_index)
            .map_err(|err| self.reject(err.into()))?;
        self.commit(&mut state);
        Ok(())
    }

    /// Scores and locks the module's quiz; returns this attempt's score.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownModule`, or `ProgressError::Quiz` when
    /// the quiz is incomplete or already submitted.
    pub fn submit_quiz(&self, module_id: &ModuleId) -> Result<u32, ProgressError> {
        let module = self.module(module_id)?;

        let mut state = self.lock();
        let score = state
            .progress
            .submit_quiz(module_id, module.quiz())
            .map_err(|err| self.reject(err.into()))?;
        tracing::debug!(
            module = %module_id,
            score,
            best = state.progress.module_score(module_id),
            "quiz submitted"
        );
        self.commit(&mut state);
        Ok(score)
    }

    /// Unlocks the module's quiz and clears its answers; the best score stays.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownModule` for modules outside the catalog.
    pub fn retry_quiz(&self, module_id: &ModuleId) -> Result<(), ProgressError> {
        let module = self.module(module_id)?;

        let mut state = self.lock();
        state.progress.retry_quiz(module_id, module.quiz());
        tracing::debug!(module = %module_id, "quiz reset for retry");
        self.commit(&mut state);
        Ok(())
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ProgressError::UnknownModule` for modules outside the catalog.
    pub fn quiz_state(&self, module_id: &ModuleId) -> Result<QuizState, ProgressError> {
        let module = self.module(module_id)?;
        Ok(self.lock().progress.quiz_state(module_id, module.quiz()))
    }

    #[must_use]
    pub fn is_passed(&self, module_id: &ModuleId) -> bool {
        self.policy
            .is_passed(self.lock().progress.module_score(module_id))
    }

    /// Whole-course completion as a rounded percentage.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let state = self.lock();
        let completed = self
            .catalog
            .modules()
            .iter()
            .map(|module| state.progress.module_completed_lessons(module))
            .sum();
        LearnerProgress::progress_percent(completed, self.catalog.total_lessons())
    }

    //
    // ─── LIFECYCLE ─────────────────────────────────────────────────────────────
    //

    /// Writes the latest state immediately instead of waiting for the debounce.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }

    /// Blocking `flush` for synchronous shutdown hooks such as a window close.
    ///
    /// The write runs on a helper thread against the runtime the store was
    /// opened on, so it may be called from inside or outside that runtime.
    /// That runtime must be multi-threaded.
    pub fn flush_blocking(&self) {
        std::thread::scope(|scope| {
            let writer = scope.spawn(|| self.runtime.block_on(self.flush()));
            if writer.join().is_err() {
                tracing::warn!("progress flush panicked during shutdown");
            }
        });
    }

    /// Ends the learner's local session: forgets in-memory progress and
    /// deletes the durable record, discarding any pending write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable record cannot be removed. The
    /// in-memory state is reset regardless.
    pub async fn clear_for_sign_out(&self) -> Result<(), StorageError> {
        let revision = {
            let mut state = self.lock();
            state.progress = LearnerProgress::new();
            state.revision += 1;
            let revision = state.revision;
            self.persister.schedule(Snapshot {
                revision,
                progress: state.progress.clone(),
            });
            revision
        };
        tracing::info!("clearing local learner progress");
        self.persister.clear(revision).await
    }

    fn module(&self, module_id: &ModuleId) -> Result<&Module, ProgressError> {
        self.catalog
            .module(module_id)
            .ok_or_else(|| self.reject(ProgressError::UnknownModule(module_id.clone())))
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn commit(&self, state: &mut StoreState) {
        state.revision += 1;
        self.persister.schedule(Snapshot {
            revision: state.revision,
            progress: state.progress.clone(),
        });
    }

    fn reject(&self, err: ProgressError) -> ProgressError {
        tracing::debug!(error = %err, "progress operation rejected");
        err
    }
}

/// Loads persisted progress, falling back to empty progress on any failure.
pub async fn hydrate(repo: &dyn ProgressRepository) -> LearnerProgress {
    match repo.load_progress().await {
        Ok(Some(progress)) => {
            tracing::debug!(
                completed = progress.completed_lessons().len(),
                "hydrated learner progress"
            );
            progress
        }
        Ok(None) => LearnerProgress::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load learner progress; starting fresh");
            LearnerProgress::new()
        }
    }
}
