use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::QuizSession;
use quiz_core::time::fixed_clock;
use services::{
    AppServices, AppSettingsService, EmbeddingProvider, LanguageModel, ProviderError,
    QuizService, StaticAiProviders,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{BuilderView, QuizView, SettingsView};

pub const COLLECTION: &str = "quiz_documents";

/// Constant embeddings; the views never depend on ranking.
pub struct FlatEmbeddings;

#[async_trait]
impl EmbeddingProvider for FlatEmbeddings {
    async fn embed_documents(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        Ok(texts.iter().map(|_| vec![1.0, 0.0]).collect())
    }
}

/// Model that never answers; smoke tests only render.
pub struct OfflineModel;

#[async_trait]
impl LanguageModel for OfflineModel {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Disabled)
    }
}

struct TestApp(AppServices);

impl UiApp for TestApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        self.0.quiz()
    }

    fn app_settings(&self) -> Arc<AppSettingsService> {
        self.0.app_settings()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Builder,
    Quiz,
    Settings,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: QuizSession,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| Signal::new(props.session.clone()));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Builder => rsx! { BuilderView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Settings => rsx! { SettingsView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
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

pub fn setup_view_harness(view: ViewKind, session: QuizSession) -> ViewHarness {
    setup_view_harness_with_storage(view, session, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    session: QuizSession,
    storage: Storage,
) -> ViewHarness {
    let providers = Arc::new(StaticAiProviders::new(
        Arc::new(FlatEmbeddings),
        Arc::new(OfflineModel),
    ));
    let app = Arc::new(TestApp(AppServices::from_storage(
        &storage,
        COLLECTION,
        fixed_clock(),
        providers,
    )));

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps { app, view, session },
    );

    ViewHarness { dom, storage }
}
