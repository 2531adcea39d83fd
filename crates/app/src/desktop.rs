use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AppServices, AuthService, CertificateService, Clock, FileOpener, InternService,
    StudentService, SubmissionService, TrainerService,
};
use ui::{App, NoticeBoard, PendingRedirect, UiApp, build_app_context};

/// Composition handed to the desktop UI.
pub struct DesktopApp {
    pub services: AppServices,
    pub clock: Clock,
    pub opener: Arc<dyn FileOpener>,
    pub redirects: Arc<PendingRedirect>,
    pub notices: Arc<NoticeBoard>,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.clock
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
        Arc::clone(&self.opener)
    }

    fn redirects(&self) -> Arc<PendingRedirect> {
        Arc::clone(&self.redirects)
    }

    fn notices(&self) -> Arc<NoticeBoard> {
        Arc::clone(&self.notices)
    }
}

pub fn launch(app: DesktopApp) {
    let app: Arc<dyn UiApp> = Arc::new(app);
    let context = build_app_context(&app);

    // Some dev setups default tao windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("LMS")
            .with_always_on_top(false),
    );

    tracing::info!("launching desktop client");
    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}
