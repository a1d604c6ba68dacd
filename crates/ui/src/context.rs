use std::sync::Arc;

use learn_core::model::{Catalog, QuizPolicy};
use services::{AppServices, Clock, ProgressStore, SessionProvider, SignOutService};

/// What the UI needs from the application composition root.
pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<Catalog>;
    fn progress(&self) -> Arc<ProgressStore>;
    fn sessions(&self) -> Arc<dyn SessionProvider>;
    fn sign_out(&self) -> Arc<SignOutService>;
    fn clock(&self) -> Clock;
}

impl UiApp for AppServices {
    fn catalog(&self) -> Arc<Catalog> {
        AppServices::catalog(self)
    }

    fn progress(&self) -> Arc<ProgressStore> {
        AppServices::progress(self)
    }

    fn sessions(&self) -> Arc<dyn SessionProvider> {
        AppServices::sessions(self)
    }

    fn sign_out(&self) -> Arc<SignOutService> {
        AppServices::sign_out(self)
    }

    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<Catalog>,
    progress: Arc<ProgressStore>,
    sessions: Arc<dyn SessionProvider>,
    sign_out: Arc<SignOutService>,
    clock: Clock,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress(),
            sessions: app.sessions(),
            sign_out: app.sign_out(),
            clock: app.clock(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressStore> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn policy(&self) -> QuizPolicy {
        self.progress.policy()
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
