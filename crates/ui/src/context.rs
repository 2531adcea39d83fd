use std::sync::Arc;

use chrono::NaiveDate;
use services::{
    AuthService, CertificateService, Clock, FileOpener, InternService, Page, StudentService,
    SubmissionService, TrainerService,
};

use crate::platform::{NoticeBoard, PendingRedirect};

/// What the composition root hands to the UI.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;

    fn auth(&self) -> Arc<AuthService>;
    fn student(&self) -> Arc<StudentService>;
    fn intern(&self) -> Arc<InternService>;
    fn trainer(&self) -> Arc<TrainerService>;
    fn submissions(&self) -> Arc<SubmissionService>;
    fn certificates(&self) -> Arc<CertificateService>;

    fn opener(&self) -> Arc<dyn FileOpener>;
    /// Must be the navigator the services were built with.
    fn redirects(&self) -> Arc<PendingRedirect>;
    /// Must be the notifier the services were built with.
    fn notices(&self) -> Arc<NoticeBoard>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    auth: Arc<AuthService>,
    student: Arc<StudentService>,
    intern: Arc<InternService>,
    trainer: Arc<TrainerService>,
    submissions: Arc<SubmissionService>,
    certificates: Arc<CertificateService>,
    opener: Arc<dyn FileOpener>,
    redirects: Arc<PendingRedirect>,
    notices: Arc<NoticeBoard>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            auth: app.auth(),
            student: app.student(),
            intern: app.intern(),
            trainer: app.trainer(),
            submissions: app.submissions(),
            certificates: app.certificates(),
            opener: app.opener(),
            redirects: app.redirects(),
            notices: app.notices(),
        }
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn student(&self) -> Arc<StudentService> {
        Arc::clone(&self.student)
    }

    #[must_use]
    pub fn intern(&self) -> Arc<InternService> {
        Arc::clone(&self.intern)
    }

    #[must_use]
    pub fn trainer(&self) -> Arc<TrainerService> {
        Arc::clone(&self.trainer)
    }

    #[must_use]
    pub fn submissions(&self) -> Arc<SubmissionService> {
        Arc::clone(&self.submissions)
    }

    #[must_use]
    pub fn certificates(&self) -> Arc<CertificateService> {
        Arc::clone(&self.certificates)
    }

    #[must_use]
    pub fn opener(&self) -> Arc<dyn FileOpener> {
        Arc::clone(&self.opener)
    }

    /// One-shot: the page a service asked for since the last call.
    #[must_use]
    pub fn take_redirect(&self) -> Option<Page> {
        self.redirects.take()
    }

    #[must_use]
    pub fn take_notice(&self) -> Option<String> {
        self.notices.take()
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
