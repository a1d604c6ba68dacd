use dioxus::desktop::tao::event::{Event, WindowEvent};
use dioxus::desktop::use_wry_event_handler;
use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;

pub const APP_TITLE: &str = "InvestLab";

#[component]
pub fn App() -> Element {
    // Pending progress must be on disk before the window goes away.
    let progress = use_context::<AppContext>().progress();
    use_wry_event_handler(move |event, _| {
        if let Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } = event
        {
            tracing::debug!("window closing; flushing learner progress");
            progress.flush_blocking();
        }
    });

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{APP_TITLE}" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| {
                    tracing::error!(?errors, "render failure");
                    rsx! { FatalScreen { details: format!("{errors:?}") } }
                },
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn FatalScreen(details: String) -> Element {
    rsx! {
        div { class: "fatal",
            h1 { "{APP_TITLE} hit an unexpected error" }
            p { "Your progress is saved. Restart the app to continue learning." }
            pre { "{details}" }
        }
    }
}
