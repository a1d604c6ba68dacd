//! Boundary to whoever knows the signed-in learner.
//!
//! The Learning Center only needs a display name and a way to end the session;
//! identity management itself lives behind `SessionProvider`.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::error::AuthError;
use crate::progress_store::ProgressStore;

/// The signed-in learner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub signed_in_at: DateTime<Utc>,
}

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The active session, or `None` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be reached.
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// Ends the active session. Signing out twice is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider cannot be reached.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Single-learner provider for the desktop app.
///
/// Starts signed in as the configured user and stays signed out after
/// `sign_out` until the process restarts.
pub struct LocalSessionProvider {
    session: Mutex<Option<AuthSession>>,
}

impl LocalSessionProvider {
    #[must_use]
    pub fn new(display_name: impl Into<String>, clock: Clock) -> Self {
        let display_name = display_name.into();
        let session = AuthSession {
            user_id: format!("local:{}", display_name.to_lowercase().replace(' ', "-")),
            email: None,
            display_name,
            signed_in_at: clock.now(),
        };
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    /// A provider with nobody signed in.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let previous = self
            .session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(session) = previous {
            tracing::info!(user = %session.user_id, "signed out");
        }
        Ok(())
    }
}

/// Ends the session and wipes the learner's local progress.
#[derive(Clone)]
pub struct SignOutService {
    provider: Arc<dyn SessionProvider>,
    store: Arc<ProgressStore>,
}

impl SignOutService {
    #[must_use]
    pub fn new(provider: Arc<dyn SessionProvider>, store: Arc<ProgressStore>) -> Self {
        Self { provider, store }
    }

    /// Signs out at the provider, then clears local progress.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the provider fails (progress is kept) or if the
    /// durable record cannot be deleted.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.store.clear_for_sign_out().await?;
        Ok(())
    }
}
