use std::sync::Arc;

use lms_core::model::{
    AssignmentDraft, AssignmentId, CourseId, InternshipId, QuizId, QuizResultRow, Role,
    ScheduledItem, Submission, SubmissionSource, SubmissionUpdate, TrainerDashboard, TrainerQuiz,
};
use url::Url;

use crate::client::{ApiClient, MessageResponse};
use crate::config::ApiConfig;
use crate::error::{ApiError, ServiceError};
use crate::transport::ApiRequest;

/// Course authoring and submission review for trainers.
#[derive(Clone)]
pub struct TrainerService {
    client: Arc<ApiClient>,
    config: ApiConfig,
}

impl TrainerService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, config: ApiConfig) -> Self {
        Self { client, config }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: String) -> Result<T, ServiceError> {
        self.client
            .authorized(Role::Trainer, ApiRequest::get(path))
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn dashboard(&self) -> Result<TrainerDashboard, ServiceError> {
        self.get("trainer/dashboard".into()).await
    }

    //
    // ─── ASSIGNMENTS ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn assignments(&self, course_id: CourseId) -> Result<Vec<ScheduledItem>, ServiceError> {
        self.get(format!("trainer/course/{course_id}/assignments"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Api` with the server's text when the course has
    /// reached its assignment limit.
    pub async fn create_assignment(
        &self,
        course_id: CourseId,
        draft: AssignmentDraft,
    ) -> Result<String, ServiceError> {
        let body = to_body(&draft.for_course(course_id))?;
        let response: MessageResponse = self
            .client
            .authorized(Role::Trainer, ApiRequest::post("trainer/assign", body))
            .await?;
        tracing::info!(%course_id, "assignment created");
        Ok(response
            .message
            .unwrap_or_else(|| "Assignment created".into()))
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// backend refuses the change.
    pub async fn update_assignment(
        &self,
        assignment_id: AssignmentId,
        draft: AssignmentDraft,
    ) -> Result<(), ServiceError> {
        let body = to_body(&draft)?;
        self.client
            .authorized_unit(
                Role::Trainer,
                ApiRequest::put(format!("trainer/assignment/{assignment_id}"), body),
            )
            .await?;
        tracing::info!(%assignment_id, "assignment updated");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// backend refuses the deletion.
    pub async fn delete_assignment(&self, assignment_id: AssignmentId) -> Result<(), ServiceError> {
        self.client
            .authorized_unit(
                Role::Trainer,
                ApiRequest::delete(format!("trainer/assignment/{assignment_id}")),
            )
            .await?;
        tracing::info!(%assignment_id, "assignment deleted");
        Ok(())
    }

    //
    // ─── SUBMISSIONS ───────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn assignment_submissions(
        &self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<Submission>, ServiceError> {
        self.get(format!("trainer/assignment/{assignment_id}/submissions"))
            .await
    }

    /// Every submission across a course's assignments.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn course_submissions(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Submission>, ServiceError> {
        self.get(format!("trainer/course/{course_id}/submissions"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn internship_tasks(
        &self,
        internship_id: InternshipId,
    ) -> Result<Vec<ScheduledItem>, ServiceError> {
        self.get(format!("trainer/internship/{internship_id}/tasks"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn internship_submissions(
        &self,
        internship_id: InternshipId,
    ) -> Result<Vec<Submission>, ServiceError> {
        self.get(format!("trainer/internship/{internship_id}/submissions"))
            .await
    }

    /// Record a grade, feedback or verdict on a submission.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an update that changes nothing,
    /// and the usual session and request errors otherwise.
    pub async fn review(
        &self,
        source: SubmissionSource,
        update: &SubmissionUpdate,
    ) -> Result<(), ServiceError> {
        if update.grade.is_none() && update.feedback.is_none() && update.status.is_none() {
            return Err(ServiceError::Validation("Nothing to update".into()));
        }
        let path = match source {
            SubmissionSource::Assignment => "trainer/submission/update",
            SubmissionSource::InternTask => "trainer/task_submission/update",
        };
        self.client
            .authorized_unit(Role::Trainer, ApiRequest::post(path, to_body(update)?))
            .await?;
        tracing::info!(submission_id = %update.submission_id, ?source, "submission reviewed");
        Ok(())
    }

    /// Where the uploaded file of a submission can be fetched from.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when the submission has no file.
    pub fn submission_file(&self, submission: &Submission) -> Result<Url, ServiceError> {
        if submission.file_url.trim().is_empty() {
            return Err(ServiceError::Validation("No file attached".into()));
        }
        self.config
            .asset_url(&submission.file_url)
            .map_err(|err| ServiceError::Api(ApiError::Url(err)))
    }

    //
    // ─── QUIZZES ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn quizzes(&self, course_id: CourseId) -> Result<Vec<TrainerQuiz>, ServiceError> {
        self.get(format!("trainer/course/{course_id}/quizzes")).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn quiz_results(&self, quiz_id: QuizId) -> Result<Vec<QuizResultRow>, ServiceError> {
        self.get(format!("trainer/quiz/{quiz_id}/results")).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// backend refuses the deletion.
    pub async fn delete_quiz(&self, quiz_id: QuizId) -> Result<(), ServiceError> {
        self.client
            .authorized_unit(
                Role::Trainer,
                ApiRequest::delete(format!("trainer/quiz/{quiz_id}")),
            )
            .await?;
        tracing::info!(%quiz_id, "quiz deleted");
        Ok(())
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(value).map_err(|err| ServiceError::Api(ApiError::Decode(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Harness, Reply};
    use crate::transport::{Body, Method};
    use chrono::NaiveDate;
    use lms_core::model::{SubmissionId, TaskId, filter_by_task};
    use serde_json::json;

    fn service(harness: &Harness) -> TrainerService {
        TrainerService::new(
            harness.client.clone(),
            ApiConfig::new("http://127.0.0.1:5005").unwrap(),
        )
    }

    #[tokio::test]
    async fn dashboard_totals_students() {
        let harness = Harness::signed_in(Role::Trainer).await;
        harness.transport.reply(
            Method::Get,
            "trainer/dashboard",
            Reply::Json(json!({
                "courses": [
                    {"course_id": 1, "course_name": "Rust", "students": 12},
                    {"course_id": 2, "course_name": "SQL", "students": 3}
                ],
                "internships": [{"internship_id": 4, "intern_name": "Backend"}]
            })),
        );

        let dashboard = service(&harness).dashboard().await.unwrap();
        assert_eq!(dashboard.total_students(), 15);
        assert_eq!(dashboard.internships.len(), 1);
    }

    #[tokio::test]
    async fn create_assignment_attaches_course() {
        let harness = Harness::signed_in(Role::Trainer).await;
        harness.transport.reply(
            Method::Post,
            "trainer/assign",
            Reply::Json(json!({"message": "Assignment created"})),
        );
        let draft = AssignmentDraft::new("Essay", NaiveDate::from_ymd_opt(2023, 12, 1)).unwrap();

        service(&harness)
            .create_assignment(CourseId::new(2), draft)
            .await
            .unwrap();
        assert_eq!(
            harness.transport.requests()[0].body,
            Body::Json(json!({"course_id": 2, "title": "Essay", "due_date": "2023-12-01"}))
        );
    }

    #[tokio::test]
    async fn assignment_limit_error_is_surfaced() {
        let harness = Harness::signed_in(Role::Trainer).await;
        harness.transport.reply(
            Method::Post,
            "trainer/assign",
            Reply::Rejected(400, "Assignment limit reached"),
        );
        let draft = AssignmentDraft::new("Extra", None).unwrap();

        let err = service(&harness)
            .create_assignment(CourseId::new(2), draft)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "request failed with status 400: Assignment limit reached");
    }

    #[tokio::test]
    async fn review_picks_endpoint_by_source() {
        let harness = Harness::signed_in(Role::Trainer).await;
        for path in ["trainer/submission/update", "trainer/task_submission/update"] {
            harness
                .transport
                .reply(Method::Post, path, Reply::Json(json!({"message": "ok"})));
        }
        let trainer = service(&harness);
        let update = SubmissionUpdate::new(SubmissionId::new(9)).approve();

        trainer
            .review(SubmissionSource::Assignment, &update)
            .await
            .unwrap();
        trainer
            .review(SubmissionSource::InternTask, &update)
            .await
            .unwrap();

        let paths: Vec<_> = harness
            .transport
            .requests()
            .into_iter()
            .map(|request| request.path)
            .collect();
        assert_eq!(
            paths,
            vec!["trainer/submission/update", "trainer/task_submission/update"]
        );
    }

    #[tokio::test]
    async fn empty_review_is_refused_locally() {
        let harness = Harness::signed_in(Role::Trainer).await;
        let err = service(&harness)
            .review(
                SubmissionSource::Assignment,
                &SubmissionUpdate::new(SubmissionId::new(1)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(harness.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn internship_submissions_filter_by_task() {
        let harness = Harness::signed_in(Role::Trainer).await;
        harness.transport.reply(
            Method::Get,
            "trainer/internship/4/submissions",
            Reply::Json(json!([
                {"submission_id": 1, "student_name": "Ada", "task_id": 7, "file_url": "/uploads/a.pdf"},
                {"submission_id": 2, "student_name": "Bo", "task_id": 8, "file_url": ""}
            ])),
        );
        let trainer = service(&harness);

        let all = trainer
            .internship_submissions(InternshipId::new(4))
            .await
            .unwrap();
        let week = filter_by_task(&all, Some(TaskId::new(7)));
        assert_eq!(week.len(), 1);
        assert_eq!(
            trainer.submission_file(week[0]).unwrap().as_str(),
            "http://127.0.0.1:5005/uploads/a.pdf"
        );
        assert!(trainer.submission_file(&all[1]).is_err());
    }

    #[tokio::test]
    async fn quiz_results_and_delete() {
        let harness = Harness::signed_in(Role::Trainer).await;
        harness.transport.reply(
            Method::Get,
            "trainer/quiz/3/results",
            Reply::Json(json!([{"student_name": "Ada", "score": 4, "total": 5}])),
        );
        harness
            .transport
            .reply(Method::Delete, "trainer/quiz/3", Reply::Json(json!(null)));
        let trainer = service(&harness);

        let rows = trainer.quiz_results(QuizId::new(3)).await.unwrap();
        assert_eq!(rows[0].score, 4);
        trainer.delete_quiz(QuizId::new(3)).await.unwrap();
        assert_eq!(harness.transport.requests()[1].method, Method::Delete);
    }

    #[tokio::test]
    async fn student_session_cannot_use_trainer_endpoints() {
        let harness = Harness::signed_in(Role::Student).await;
        let err = service(&harness).dashboard().await.unwrap_err();
        assert!(err.needs_login());
        assert!(harness.transport.requests().is_empty());
    }
}
