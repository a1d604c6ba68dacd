use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let percent = ctx.progress().progress_percent();

    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
            }
            div { class: "view-divider" }
            div { class: "card",
                p { "Course progress: {percent}%" }
                Link { class: "btn btn-primary", to: Route::Learning {}, "Continue learning" }
            }
        }
    }
}

#[component]
pub fn MarketsView() -> Element {
    rsx! { ComingSoon { title: "Markets" } }
}

#[component]
pub fn PlannerView() -> Element {
    rsx! { ComingSoon { title: "Planner" } }
}

#[component]
pub fn CommunityView() -> Element {
    rsx! { ComingSoon { title: "Community" } }
}

#[component]
fn ComingSoon(title: &'static str) -> Element {
    rsx! {
        div { class: "page",
            header { class: "view-header",
                h2 { class: "view-title", "{title}" }
            }
            div { class: "view-divider" }
            p { class: "view-subtitle", "This section is not available in the desktop edition yet." }
        }
    }
}
