use std::sync::Arc;

use lms_core::model::{
    AnswerSheet, Course, CourseId, Mentor, ProgressEntry, Quiz, QuizId, QuizScore, QuizSummary,
    Resource, Role, StudentDashboard, enrollable_courses,
};
use serde_json::json;
use url::Url;

use crate::client::{ApiClient, MessageResponse};
use crate::config::ApiConfig;
use crate::error::{ApiError, ServiceError};
use crate::transport::ApiRequest;

/// A course resource with its link resolved against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub resource: Resource,
    pub url: Url,
}

/// Quiz listing for one enrolled course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseQuizzes {
    pub course: Course,
    pub quizzes: Vec<QuizSummary>,
}

/// Loads and mutates everything on the student dashboard.
#[derive(Clone)]
pub struct StudentService {
    client: Arc<ApiClient>,
    config: ApiConfig,
}

impl StudentService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn dashboard(&self) -> Result<StudentDashboard, ServiceError> {
        self.client
            .authorized(Role::Student, ApiRequest::get("student/dashboard"))
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn progress(&self) -> Result<Vec<ProgressEntry>, ServiceError> {
        self.client
            .authorized(Role::Student, ApiRequest::get("student/progress"))
            .await
    }

    /// Courses the student is enrolled in.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn my_courses(&self) -> Result<Vec<Course>, ServiceError> {
        self.client
            .authorized(Role::Student, ApiRequest::get("student/courses"))
            .await
    }

    /// Public catalogue minus the courses already joined.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if either listing fails.
    pub async fn available_courses(&self) -> Result<Vec<Course>, ServiceError> {
        let mine = self.my_courses().await?;
        let catalogue: Vec<Course> = self.client.public(ApiRequest::get("courses")).await?;
        Ok(enrollable_courses(&catalogue, &mine)
            .into_iter()
            .cloned()
            .collect())
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// backend refuses the enrollment.
    pub async fn enroll(&self, course_id: CourseId) -> Result<String, ServiceError> {
        let response: MessageResponse = self
            .client
            .authorized(
                Role::Student,
                ApiRequest::post("student/enroll", json!({ "course_id": course_id })),
            )
            .await?;
        tracing::info!(%course_id, "enrolled in course");
        Ok(response.message.unwrap_or_else(|| "Enrolled".into()))
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn quizzes(&self, course_id: CourseId) -> Result<Vec<QuizSummary>, ServiceError> {
        self.client
            .authorized(
                Role::Student,
                ApiRequest::get(format!("student/course/{course_id}/quizzes")),
            )
            .await
    }

    /// Quizzes for every enrolled course, in enrollment order.
    ///
    /// # Errors
    ///
    /// Returns the first `ServiceError` encountered.
    pub async fn all_quizzes(&self) -> Result<Vec<CourseQuizzes>, ServiceError> {
        let courses = self.my_courses().await?;
        let mut listings = Vec::with_capacity(courses.len());
        for course in courses {
            let quizzes = self.quizzes(course.id).await?;
            listings.push(CourseQuizzes { course, quizzes });
        }
        Ok(listings)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn quiz(&self, quiz_id: QuizId) -> Result<Quiz, ServiceError> {
        self.client
            .authorized(
                Role::Student,
                ApiRequest::get(format!("student/quiz/{quiz_id}")),
            )
            .await
    }

    /// Submit a completed answer sheet.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::QuizAnswer` without contacting the backend when
    /// any question is unanswered.
    pub async fn submit_quiz(&self, sheet: &AnswerSheet) -> Result<QuizScore, ServiceError> {
        let submission = sheet.finish()?;
        let body = serde_json::to_value(submission)
            .map_err(|err| ServiceError::Api(ApiError::Decode(err)))?;
        let quiz_id = sheet.quiz_id();
        let score: QuizScore = self
            .client
            .authorized(
                Role::Student,
                ApiRequest::post(format!("student/quiz/{quiz_id}/submit"), body),
            )
            .await?;
        tracing::info!(%quiz_id, score = score.score, total = score.total, "quiz submitted");
        Ok(score)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, the request
    /// fails, or a link cannot be resolved.
    pub async fn resources(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<ResolvedResource>, ServiceError> {
        let resources: Vec<Resource> = self
            .client
            .authorized(
                Role::Student,
                ApiRequest::get(format!("student/course/{course_id}/resources")),
            )
            .await?;
        resources
            .into_iter()
            .map(|resource| -> Result<ResolvedResource, ServiceError> {
                let url = self
                    .config
                    .resource_url(&resource.url)
                    .map_err(ApiError::from)?;
                Ok(ResolvedResource { resource, url })
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the session is missing or expired, or the
    /// request fails.
    pub async fn mentors(&self) -> Result<Vec<Mentor>, ServiceError> {
        self.client
            .authorized(Role::Student, ApiRequest::get("mentors"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Page;
    use crate::testing::{Harness, Reply};
    use crate::transport::{Body, Method};
    use lms_core::model::{AnswerChoice, QuestionId, QuizAnswerError};
    use storage::repository::CredentialRepository;

    fn service(harness: &Harness) -> StudentService {
        StudentService::new(
            harness.client.clone(),
            ApiConfig::new("http://127.0.0.1:5005").unwrap(),
        )
    }

    #[tokio::test]
    async fn dashboard_sends_bearer_token() {
        let harness = Harness::signed_in(Role::Student).await;
        harness.transport.reply(
            Method::Get,
            "student/dashboard",
            Reply::Json(json!({"courses": [], "study_streak": 2})),
        );

        let dashboard = service(&harness).dashboard().await.unwrap();
        assert_eq!(dashboard.study_streak, Some(2));
        assert_eq!(
            harness.transport.requests()[0].token.as_deref(),
            Some("token-1")
        );
    }

    #[tokio::test]
    async fn unauthorized_from_concurrent_loaders_redirects_once() {
        let harness = Harness::signed_in(Role::Student).await;
        for path in ["student/dashboard", "student/progress", "mentors"] {
            harness
                .transport
                .reply(Method::Get, path, Reply::Unauthorized);
        }
        let student = service(&harness);

        let (dashboard, progress, mentors) =
            tokio::join!(student.dashboard(), student.progress(), student.mentors());

        assert!(matches!(dashboard, Err(ServiceError::SessionExpired)));
        assert!(progress.unwrap_err().needs_login());
        assert!(mentors.unwrap_err().needs_login());
        assert!(harness.repo.load().await.unwrap().is_none());
        assert_eq!(harness.navigator.pages(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn wrong_role_never_reaches_backend() {
        let harness = Harness::signed_in(Role::Intern).await;
        let err = service(&harness).dashboard().await.unwrap_err();
        assert!(err.needs_login());
        assert!(harness.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn available_courses_filters_enrolled() {
        let harness = Harness::signed_in(Role::Student).await;
        harness.transport.reply(
            Method::Get,
            "student/courses",
            Reply::Json(json!([{"id": 1, "name": "Rust"}])),
        );
        harness.transport.reply(
            Method::Get,
            "courses",
            Reply::Json(json!([{"id": 1, "name": "Rust"}, {"id": 2, "name": "SQL"}])),
        );

        let open = service(&harness).available_courses().await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "SQL");
    }

    #[tokio::test]
    async fn incomplete_quiz_is_not_submitted() {
        let harness = Harness::signed_in(Role::Student).await;
        let quiz: Quiz = serde_json::from_value(json!({
            "id": 5, "title": "W1",
            "questions": [{"id": 1, "text": "?"}, {"id": 2, "text": "?"}]
        }))
        .unwrap();
        let mut sheet = AnswerSheet::new(&quiz);
        sheet.choose(QuestionId::new(1), AnswerChoice::D).unwrap();

        let err = service(&harness).submit_quiz(&sheet).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::QuizAnswer(QuizAnswerError::Unanswered { missing: 1 })
        ));
        assert!(harness.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn complete_quiz_posts_answers() {
        let harness = Harness::signed_in(Role::Student).await;
        harness.transport.reply(
            Method::Post,
            "student/quiz/5/submit",
            Reply::Json(json!({"score": 1, "total": 1})),
        );
        let quiz: Quiz =
            serde_json::from_value(json!({"id": 5, "questions": [{"id": 9, "text": "?"}]}))
                .unwrap();
        let mut sheet = AnswerSheet::new(&quiz);
        sheet.choose(QuestionId::new(9), AnswerChoice::A).unwrap();

        let score = service(&harness).submit_quiz(&sheet).await.unwrap();
        assert_eq!(score, QuizScore { score: 1, total: 1 });
        assert_eq!(
            harness.transport.requests()[0].body,
            Body::Json(json!({"answers": {"9": "A"}}))
        );
    }

    #[tokio::test]
    async fn resources_resolve_relative_links() {
        let harness = Harness::signed_in(Role::Student).await;
        harness.transport.reply(
            Method::Get,
            "student/course/4/resources",
            Reply::Json(json!([
                {"id": 1, "title": "Slides", "type": "PDF", "url": "uploads/s.pdf"},
                {"id": 2, "title": "Talk", "type": "Video", "url": "https://video.example/x"}
            ])),
        );

        let resources = service(&harness).resources(CourseId::new(4)).await.unwrap();
        assert_eq!(
            resources[0].url.as_str(),
            "http://127.0.0.1:5005/api/uploads/s.pdf"
        );
        assert_eq!(resources[1].url.as_str(), "https://video.example/x");
    }
}
