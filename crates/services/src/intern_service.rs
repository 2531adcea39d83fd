use std::sync::Arc;

use lms_core::model::{Enrollment, InternStats, InternTask, Internship, InternshipId, Role};
use serde_json::json;

use crate::client::{ApiClient, MessageResponse};
use crate::error::ServiceError;
use crate::transport::ApiRequest;

/// Everything on the intern dashboard except uploads and certificates.
#[derive(Clone)]
pub struct InternService {
    client: Arc<ApiClient>,
}

impl InternService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn stats(&self) -> Result<InternStats, ServiceError> {
        self.client
            .authorized(Role::Intern, ApiRequest::get("intern/stats"))
            .await
    }

    /// Programs the intern is enrolled in, with progress.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn enrollments(&self) -> Result<Vec<Enrollment>, ServiceError> {
        self.client
            .authorized(Role::Intern, ApiRequest::get("enrollments"))
            .await
    }

    /// Programs the intern has not joined yet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if either listing fails.
    pub async fn available_internships(&self) -> Result<Vec<Internship>, ServiceError> {
        let enrolled = self.enrollments().await?;
        let catalogue: Vec<Internship> = self
            .client
            .authorized(Role::Intern, ApiRequest::get("internships"))
            .await?;
        Ok(catalogue
            .into_iter()
            .filter(|program| enrolled.iter().all(|mine| mine.id != program.id))
            .collect())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// backend refuses the enrollment.
    pub async fn enroll(&self, internship_id: InternshipId) -> Result<String, ServiceError> {
        let response: MessageResponse = self
            .client
            .authorized(
                Role::Intern,
                ApiRequest::post("enrollments", json!({ "internship_id": internship_id })),
            )
            .await?;
        tracing::info!(%internship_id, "enrolled in internship");
        Ok(response
            .message
            .unwrap_or_else(|| "Enrolled successfully".into()))
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn tasks(&self) -> Result<Vec<InternTask>, ServiceError> {
        self.client
            .authorized(Role::Intern, ApiRequest::get("tasks"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Reply};
    use crate::transport::{Body, Method};
    use lms_core::model::SubmissionStatus;

    #[tokio::test]
    async fn tasks_decode_with_status() {
        let harness = Harness::signed_in(Role::Intern).await;
        harness.transport.reply(
            Method::Get,
            "tasks",
            Reply::Json(json!([
                {"id": 1, "title": "Setup", "is_unlocked": true, "status": "Rejected",
                 "internship_name": "Backend", "due_date": "2023-11-20"},
                {"id": 2, "title": "API", "is_unlocked": null, "status": null}
            ])),
        );

        let tasks = InternService::new(harness.client.clone()).tasks().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, SubmissionStatus::Rejected);
        assert_eq!(tasks[1].group_name(), "General Tasks");
    }

    #[tokio::test]
    async fn enroll_posts_internship_id() {
        let harness = Harness::signed_in(Role::Intern).await;
        harness.transport.reply(
            Method::Post,
            "enrollments",
            Reply::Json(json!({"message": "Enrolled"})),
        );

        let message = InternService::new(harness.client.clone())
            .enroll(InternshipId::new(4))
            .await
            .unwrap();
        assert_eq!(message, "Enrolled");
        assert_eq!(
            harness.transport.requests()[0].body,
            Body::Json(json!({"internship_id": 4}))
        );
    }

    #[tokio::test]
    async fn enroll_surfaces_server_error() {
        let harness = Harness::signed_in(Role::Intern).await;
        harness.transport.reply(
            Method::Post,
            "enrollments",
            Reply::Rejected(400, "Already enrolled"),
        );

        let err = InternService::new(harness.client.clone())
            .enroll(InternshipId::new(4))
            .await
            .unwrap_err();
        match err {
            ServiceError::Api(api) => assert_eq!(api.server_message(), Some("Already enrolled")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn available_internships_skip_enrolled() {
        let harness = Harness::signed_in(Role::Intern).await;
        harness.transport.reply(
            Method::Get,
            "enrollments",
            Reply::Json(json!([{"id": 1, "intern_name": "Backend", "progress": 40}])),
        );
        harness.transport.reply(
            Method::Get,
            "internships",
            Reply::Json(json!([
                {"id": 1, "intern_name": "Backend"},
                {"id": 2, "intern_name": "Data"}
            ])),
        );

        let open = InternService::new(harness.client.clone())
            .available_internships()
            .await
            .unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].intern_name, "Data");
    }
}
