use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::AuthSession;

use crate::context::AppContext;
use crate::views::{
    CommunityView, DashboardView, LearningView, MarketsView, PlannerView, ViewError, ViewState,
    view_state_from_resource,
};
use crate::vm::{Theme, map_market_clock, map_topbar};

const MARKET_CLOCK_REFRESH: Duration = Duration::from_secs(60);

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/learning", LearningView)] Learning {},
        #[route("/markets", MarketsView)] Markets {},
        #[route("/planner", PlannerView)] Planner {},
        #[route("/community", CommunityView)] Community {},
}

/// Shell around every page; only renders pages for a signed-in learner.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();
    let theme = use_signal(Theme::default);

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            sessions.current_session().await.map_err(|err| {
                tracing::warn!(error = %err, "failed to load session");
                ViewError::AuthUnavailable
            })
        }
    });

    let state = view_state_from_resource(resource);
    rsx! {
        div { class: "app {theme().class()}",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "shell-status", "Loading your session..." }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "shell-status",
                        p { "{err.message()}" }
                        if err.retryable() {
                            button {
                                class: "btn btn-secondary",
                                r#type: "button",
                                onclick: move |_| {
                                    let mut resource = resource;
                                    resource.restart();
                                },
                                "Retry"
                            }
                        }
                    }
                },
                ViewState::Ready(None) => rsx! {
                    div { class: "shell-status signed-out",
                        h2 { "You are signed out" }
                        p { "Sign in to continue learning." }
                    }
                },
                ViewState::Ready(Some(session)) => rsx! {
                    Sidebar {}
                    div { class: "shell",
                        Topbar {
                            session,
                            theme,
                            on_signed_out: move |()| {
                                let mut resource = resource;
                                resource.restart();
                            },
                        }
                        main { class: "content",
                            Outlet::<Route> {}
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "InvestLab" }
            ul {
                li { Link { to: Route::Dashboard {}, "Dashboard" } }
                li { Link { to: Route::Learning {}, "Learning Center" } }
                li { Link { to: Route::Markets {}, "Markets" } }
                li { Link { to: Route::Planner {}, "Planner" } }
                li { Link { to: Route::Community {}, "Community" } }
            }
        }
    }
}

#[component]
fn Topbar(session: AuthSession, theme: Signal<Theme>, on_signed_out: EventHandler<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let vm = map_topbar(&session);
    let mut signing_out = use_signal(|| false);
    let mut theme = theme;

    let clock = ctx.clock();
    let mut now = use_signal(move || clock.now());
    use_future(move || async move {
        loop {
            tokio::time::sleep(MARKET_CLOCK_REFRESH).await;
            now.set(clock.now());
        }
    });
    let market = map_market_clock(now());

    rsx! {
        header { class: "topbar",
            div { class: "market-clock",
                p { class: "market-line",
                    span { class: "{market.status.class()}" }
                    "{market.status.label()} / "
                    span { class: "market-day", "{market.day}" }
                }
                p { class: "market-date", "{market.date}" }
            }
            div { class: "topbar-user",
                span { class: "avatar", "{vm.initials}" }
                span { class: "user-name", "{vm.display_name}" }
            }
            div { class: "topbar-actions",
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| {
                        let next = theme().toggled();
                        theme.set(next);
                    },
                    "{theme().toggle_label()}"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: signing_out(),
                    onclick: move |_| {
                        let sign_out = ctx.sign_out();
                        signing_out.set(true);
                        spawn(async move {
                            match sign_out.sign_out().await {
                                Ok(()) => on_signed_out.call(()),
                                Err(err) => {
                                    tracing::warn!(error = %err, "sign out failed");
                                    signing_out.set(false);
                                }
                            }
                        });
                    },
                    "Sign out"
                }
            }
        }
    }
}
