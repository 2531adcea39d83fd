use std::sync::Arc;

use lms_core::certificate::{CertificateAffordance, CertificateCandidate, CertificateGate};
use lms_core::model::{CourseId, InternshipId, Role};
use serde_json::json;
use storage::repository::{SessionFlag, SessionFlagRepository};
use url::Url;

use crate::client::{ApiClient, UrlResponse};
use crate::config::ApiConfig;
use crate::error::{ApiError, ServiceError};
use crate::platform::{FileOpener, Notifier};
use crate::transport::ApiRequest;

const CELEBRATION: &str = "Congratulations! You have unlocked a certificate.";

/// Certificate generation, opening, and the once-per-session celebration.
#[derive(Clone)]
pub struct CertificateService {
    client: Arc<ApiClient>,
    config: ApiConfig,
    flags: Arc<dyn SessionFlagRepository>,
    notifier: Arc<dyn Notifier>,
    opener: Arc<dyn FileOpener>,
}

impl CertificateService {
    #[must_use]
    pub fn new(
        client: Arc<ApiClient>,
        config: ApiConfig,
        flags: Arc<dyn SessionFlagRepository>,
        notifier: Arc<dyn Notifier>,
        opener: Arc<dyn FileOpener>,
    ) -> Self {
        Self {
            client,
            config,
            flags,
            notifier,
            opener,
        }
    }

    /// Ask the backend to issue (or re-issue) a course certificate.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, the
    /// course is not complete, or the returned link is malformed.
    pub async fn generate_for_course(&self, course_id: CourseId) -> Result<Url, ServiceError> {
        let response: UrlResponse = self
            .client
            .authorized(
                Role::Student,
                ApiRequest::post(format!("student/certificate/{course_id}"), json!({})),
            )
            .await?;
        tracing::info!(%course_id, "course certificate generated");
        self.resolve(&response.url)
    }

    /// Issue the intern certificate; without an id the latest enrollment is used.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, no
    /// enrollment qualifies, or the returned link is malformed.
    pub async fn generate_for_internship(
        &self,
        internship_id: Option<InternshipId>,
    ) -> Result<Url, ServiceError> {
        let body = match internship_id {
            Some(id) => json!({ "internship_id": id }),
            None => json!({}),
        };
        let response: UrlResponse = self
            .client
            .authorized(Role::Intern, ApiRequest::post("intern/certificate", body))
            .await?;
        tracing::info!(internship_id = ?internship_id, "internship certificate generated");
        self.resolve(&response.url)
    }

    /// Open a server-relative certificate link with the platform opener.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Open` when nothing could open the document.
    pub fn open(&self, url: &Url) -> Result<(), ServiceError> {
        self.opener.open(url).map_err(|reason| ServiceError::Open {
            target: url.to_string(),
            reason,
        })
    }

    /// Download the existing course certificate or generate one, then open it.
    ///
    /// # Errors
    ///
    /// Returns any generation, resolution or opener failure.
    pub async fn open_course_certificate(
        &self,
        course_id: CourseId,
        certificate_url: Option<&str>,
    ) -> Result<Url, ServiceError> {
        let url = match CertificateAffordance::for_url(certificate_url) {
            CertificateAffordance::Download { url } => self.resolve(&url)?,
            CertificateAffordance::Generate => self.generate_for_course(course_id).await?,
        };
        self.open(&url)?;
        Ok(url)
    }

    /// Generate the intern certificate and open it straight away.
    ///
    /// # Errors
    ///
    /// Returns any generation or opener failure.
    pub async fn open_internship_certificate(
        &self,
        internship_id: Option<InternshipId>,
    ) -> Result<Url, ServiceError> {
        let url = self.generate_for_internship(internship_id).await?;
        self.open(&url)?;
        Ok(url)
    }

    /// Evaluate the gate and celebrate the first time it opens this session.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session flag cannot be updated.
    pub async fn evaluate<'a, T: CertificateCandidate>(
        &self,
        enrollments: &'a [T],
    ) -> Result<CertificateGate<'a, T>, ServiceError> {
        let gate = CertificateGate::evaluate(enrollments);
        self.celebrate_if_unlocked(gate.is_unlocked()).await?;
        Ok(gate)
    }

    /// Returns whether the celebration fired on this call.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session flag cannot be updated.
    pub async fn celebrate_if_unlocked(&self, unlocked: bool) -> Result<bool, ServiceError> {
        if !unlocked {
            return Ok(false);
        }
        let first = self.flags.mark_once(SessionFlag::CelebrationShown).await?;
        if first {
            self.notifier.celebrate(CELEBRATION);
        }
        Ok(first)
    }

    fn resolve(&self, link: &str) -> Result<Url, ServiceError> {
        self.config
            .asset_url(link)
            .map_err(|err| ServiceError::Api(ApiError::Url(err)))
    }
}
