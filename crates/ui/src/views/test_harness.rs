use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use lms_core::model::{Credentials, Role};
use lms_core::time::fixed_now;
use serde_json::Value;
use services::{
    ApiConfig, ApiError, ApiRequest, ApiTransport, AppServices, AuthService, CertificateService,
    Clock, FileOpener, InternService, Platform, StudentService, SubmissionService,
    TrainerService,
};
use storage::repository::Storage;
use url::Url;

use crate::context::{UiApp, build_app_context};
use crate::platform::{NoticeBoard, PendingRedirect};
use crate::views::{
    InternView, LoginView, QuizView, StudentView, TrainerCourseView, TrainerInternshipView,
};

/// Canned backend keyed by request path; `Err(401)` expires the session.
#[derive(Default)]
pub struct StubBackend {
    routes: Mutex<HashMap<String, Result<Value, u16>>>,
}

impl StubBackend {
    pub fn ok(&self, path: &str, body: Value) {
        self.routes.lock().unwrap().insert(path.into(), Ok(body));
    }

    pub fn fail(&self, path: &str, status: u16) {
        self.routes.lock().unwrap().insert(path.into(), Err(status));
    }
}

#[async_trait]
impl ApiTransport for StubBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        match self.routes.lock().unwrap().get(&request.path).cloned() {
            Some(Ok(body)) => Ok(body),
            Some(Err(401)) => Err(ApiError::Unauthorized),
            Some(Err(status)) => Err(ApiError::Rejected {
                status,
                message: "rejected".into(),
            }),
            None => Err(ApiError::Rejected {
                status: 404,
                message: format!("no route for {}", request.path),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingOpener(Mutex<Vec<String>>);

impl FileOpener for RecordingOpener {
    fn open(&self, url: &Url) -> Result<(), String> {
        self.0.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

struct TestApp {
    services: AppServices,
    opener: Arc<RecordingOpener>,
    redirects: Arc<PendingRedirect>,
    notices: Arc<NoticeBoard>,
}

impl UiApp for TestApp {
    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }

    fn student(&self) -> Arc<StudentService> {
        self.services.student()
    }

    fn intern(&self) -> Arc<InternService> {
        self.services.intern()
    }

    fn trainer(&self) -> Arc<TrainerService> {
        self.services.trainer()
    }

    fn submissions(&self) -> Arc<SubmissionService> {
        self.services.submissions()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }

    fn opener(&self) -> Arc<dyn FileOpener> {
        self.opener.clone()
    }

    fn redirects(&self) -> Arc<PendingRedirect> {
        Arc::clone(&self.redirects)
    }

    fn notices(&self) -> Arc<NoticeBoard> {
        Arc::clone(&self.notices)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Login,
    Student,
    Intern,
    Quiz(u64),
    TrainerCourse(u64),
    TrainerInternship(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
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
    use_context_provider(|| props.view);
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
        ViewKind::Login => rsx! { LoginView {} },
        ViewKind::Student => rsx! { StudentView {} },
        ViewKind::Intern => rsx! { InternView {} },
        ViewKind::Quiz(quiz_id) => rsx! { QuizView { quiz_id } },
        ViewKind::TrainerCourse(course_id) => rsx! { TrainerCourseView { course_id } },
        ViewKind::TrainerInternship(internship_id) => {
            rsx! { TrainerInternshipView { internship_id } }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub redirects: Arc<PendingRedirect>,
    pub notices: Arc<NoticeBoard>,
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

    /// Render after the page's loaders have had a chance to settle.
    pub async fn render_when(&mut self, needle: &str) -> String {
        self.rebuild();
        for _ in 0..10 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Wire a view over a stub backend, signed in as `role` when given.
pub async fn setup_view_harness(
    view: ViewKind,
    backend: Arc<StubBackend>,
    role: Option<Role>,
) -> ViewHarness {
    let redirects = Arc::new(PendingRedirect::default());
    let notices = Arc::new(NoticeBoard::default());
    let opener = Arc::new(RecordingOpener::default());
    let platform = Platform {
        navigator: redirects.clone(),
        notifier: notices.clone(),
        opener: opener.clone(),
    };
    let services = AppServices::with_transport(
        backend,
        ApiConfig::new("http://127.0.0.1:5005/api").expect("config"),
        Storage::in_memory(),
        Clock::fixed(fixed_now()),
        platform,
    );
    if let Some(role) = role {
        services
            .guard()
            .establish(&Credentials::new("token-1", role, "Ada"))
            .await
            .expect("establish session");
    }

    let app = Arc::new(TestApp {
        services,
        opener,
        redirects: Arc::clone(&redirects),
        notices: Arc::clone(&notices),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness {
        dom,
        redirects,
        notices,
    }
}
