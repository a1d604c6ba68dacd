use dioxus::prelude::*;

/// Failures a view can show instead of its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    AuthUnavailable,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::AuthUnavailable => "Could not reach the sign-in service.",
        }
    }

    /// Whether asking again can plausibly succeed.
    #[must_use]
    pub fn retryable(self) -> bool {
        matches!(self, ViewError::AuthUnavailable)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

/// Collapses a resource into the four states a view renders.
#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Ready => {}
        UseResourceState::Pending => return ViewState::Loading,
        UseResourceState::Paused | UseResourceState::Stopped => return ViewState::Idle,
    }
    resource
        .value()
        .read()
        .as_ref()
        .map_or(ViewState::Error(ViewError::Unknown), |result| match result {
            Ok(data) => ViewState::Ready(data.clone()),
            Err(err) => ViewState::Error(*err),
        })
}
