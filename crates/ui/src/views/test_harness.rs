use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use learn_core::LearningConfig;
use services::clock::fixed_clock;
use services::{AppServices, LocalSessionProvider, SessionProvider};
use storage::repository::{InMemoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::routes::Route;
use crate::views::LearningView;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Learning,
    Shell,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view {
        ViewKind::Learning => rsx! { Router::<TestRoute> {} },
        ViewKind::Shell => rsx! { Router::<Route> {} },
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { LearningView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub services: Arc<AppServices>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, repo: InMemoryRepository) -> ViewHarness {
    let sessions: Arc<dyn SessionProvider> =
        Arc::new(LocalSessionProvider::new("Test Learner", fixed_clock()));
    setup_view_harness_with_sessions(view, repo, sessions).await
}

pub async fn setup_view_harness_with_sessions(
    view: ViewKind,
    repo: InMemoryRepository,
    sessions: Arc<dyn SessionProvider>,
) -> ViewHarness {
    let storage = Storage {
        progress: Arc::new(repo.clone()),
    };
    let services = Arc::new(
        AppServices::from_parts(storage, LearningConfig::default(), sessions)
            .await
            .expect("services")
            .with_clock(fixed_clock()),
    );

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&services),
            view,
        },
    );

    ViewHarness {
        dom,
        repo,
        services,
    }
}
