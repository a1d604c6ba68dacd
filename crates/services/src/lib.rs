#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod clock;
pub mod curriculum;
pub mod error;
pub mod navigation;
mod persistence;
pub mod progress_store;

pub use clock::Clock;

pub use app_services::AppServices;
pub use auth::{AuthSession, LocalSessionProvider, SessionProvider, SignOutService};
pub use curriculum::finance_curriculum;
pub use error::{AppServicesError, AuthError, ProgressError};
pub use navigation::{NavigationController, Selection};
pub use progress_store::{ProgressStore, hydrate};
