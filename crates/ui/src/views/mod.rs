mod learning;
mod placeholders;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use learning::LearningView;
pub use placeholders::{CommunityView, DashboardView, MarketsView, PlannerView};
pub use state::{ViewError, ViewState, view_state_from_resource};
