use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::certificate_service::CertificateService;
use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::error::AppServicesError;
use crate::guard::SessionGuard;
use crate::intern_service::InternService;
use crate::platform::Platform;
use crate::student_service::StudentService;
use crate::submission_service::SubmissionService;
use crate::trainer_service::TrainerService;
use crate::transport::{ApiTransport, HttpTransport};

/// Assembles the role services around one transport and one session guard.
#[derive(Clone)]
pub struct AppServices {
    config: ApiConfig,
    guard: Arc<SessionGuard>,
    auth: Arc<AuthService>,
    student: Arc<StudentService>,
    intern: Arc<InternService>,
    trainer: Arc<TrainerService>,
    submissions: Arc<SubmissionService>,
    certificates: Arc<CertificateService>,
}

impl AppServices {
    /// Build services that talk to `config`'s backend over HTTP.
    #[must_use]
    pub fn new(config: ApiConfig, storage: Storage, clock: Clock, platform: Platform) -> Self {
        let transport: Arc<dyn ApiTransport> = Arc::new(HttpTransport::new(config.clone()));
        Self::with_transport(transport, config, storage, clock, platform)
    }

    /// Build services backed by `SQLite` credential storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the credential store cannot be opened.
    pub async fn new_sqlite(
        db_url: &str,
        config: ApiConfig,
        clock: Clock,
        platform: Platform,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(config, storage, clock, platform))
    }

    /// Build services over an arbitrary transport.
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn ApiTransport>,
        config: ApiConfig,
        storage: Storage,
        clock: Clock,
        platform: Platform,
    ) -> Self {
        let guard = Arc::new(SessionGuard::new(
            clock,
            Arc::clone(&storage.credentials),
            Arc::clone(&platform.navigator),
        ));
        let client = Arc::new(ApiClient::new(transport, Arc::clone(&guard)));

        let auth = Arc::new(AuthService::new(Arc::clone(&client)));
        let student = Arc::new(StudentService::new(Arc::clone(&client), config.clone()));
        let intern = Arc::new(InternService::new(Arc::clone(&client)));
        let trainer = Arc::new(TrainerService::new(Arc::clone(&client), config.clone()));
        let submissions = Arc::new(SubmissionService::new(Arc::clone(&client)));
        let certificates = Arc::new(CertificateService::new(
            client,
            config.clone(),
            Arc::clone(&storage.flags),
            platform.notifier,
            platform.opener,
        ));

        Self {
            config,
            guard,
            auth,
            student,
            intern,
            trainer,
            submissions,
            certificates,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    #[must_use]
    pub fn guard(&self) -> Arc<SessionGuard> {
        Arc::clone(&self.guard)
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
}
