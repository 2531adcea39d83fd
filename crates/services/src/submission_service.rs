use std::path::Path;
use std::sync::Arc;

use lms_core::model::{AssignmentId, Role, TaskId};
use lms_core::upload::{UploadName, check_upload_name, check_upload_path};

use crate::client::{ApiClient, MessageResponse};
use crate::error::ServiceError;
use crate::transport::{ApiRequest, FilePart};

/// Which dashboard data is stale after a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Student dashboard and progress bars.
    StudentDashboard,
    /// Intern task list and stats card.
    InternTasks,
}

/// Server acknowledgement of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub message: String,
    pub refresh: Refresh,
}

/// Assignment and task uploads.
///
/// File names are checked before anything is read from disk or sent, so a
/// rejected extension never produces a request.
#[derive(Clone)]
pub struct SubmissionService {
    client: Arc<ApiClient>,
}

impl SubmissionService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Upload a file from disk as the student's answer to an assignment.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Upload` for disallowed file types,
    /// `ServiceError::File` if the file cannot be read, and the usual session
    /// and request errors otherwise.
    pub async fn submit_assignment(
        &self,
        assignment_id: AssignmentId,
        path: &Path,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let name = checked(check_upload_path(path))?;
        let bytes = read_file(path).await?;
        self.send_assignment(assignment_id, name, bytes).await
    }

    /// Same as [`SubmissionService::submit_assignment`] for in-memory content.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Upload` for disallowed file types and the usual
    /// session and request errors otherwise.
    pub async fn submit_assignment_bytes(
        &self,
        assignment_id: AssignmentId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let name = checked(check_upload_name(file_name))?;
        self.send_assignment(assignment_id, name, bytes).await
    }

    /// Upload the deliverable that completes an intern task.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Upload` for disallowed file types,
    /// `ServiceError::File` if the file cannot be read, and the usual session
    /// and request errors otherwise.
    pub async fn complete_task(
        &self,
        task_id: TaskId,
        path: &Path,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let name = checked(check_upload_path(path))?;
        let bytes = read_file(path).await?;
        self.send_task(Role::Intern, task_id, name, bytes).await
    }

    /// Upload a student's deliverable for a task attached to a course.
    ///
    /// Course tasks share the intern completion endpoint.
    ///
    /// # Errors
    ///
    /// Same as [`SubmissionService::complete_task`].
    pub async fn submit_course_task(
        &self,
        task_id: TaskId,
        path: &Path,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let name = checked(check_upload_path(path))?;
        let bytes = read_file(path).await?;
        self.send_task(Role::Student, task_id, name, bytes).await
    }

    /// Same as [`SubmissionService::complete_task`] for in-memory content.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Upload` for disallowed file types and the usual
    /// session and request errors otherwise.
    pub async fn complete_task_bytes(
        &self,
        task_id: TaskId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let name = checked(check_upload_name(file_name))?;
        self.send_task(Role::Intern, task_id, name, bytes).await
    }

    async fn send_assignment(
        &self,
        assignment_id: AssignmentId,
        name: UploadName,
        bytes: Vec<u8>,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let request = ApiRequest::upload(
            "student/submit",
            vec![("assignment_id", assignment_id.to_string())],
            file_part(name, bytes),
        );
        let response: MessageResponse = self.client.authorized(Role::Student, request).await?;
        tracing::info!(%assignment_id, "assignment submitted");
        Ok(SubmissionReceipt {
            message: response
                .message
                .unwrap_or_else(|| "Assignment submitted".into()),
            refresh: Refresh::StudentDashboard,
        })
    }

    async fn send_task(
        &self,
        role: Role,
        task_id: TaskId,
        name: UploadName,
        bytes: Vec<u8>,
    ) -> Result<SubmissionReceipt, ServiceError> {
        let request = ApiRequest::upload(
            format!("intern/task/{task_id}/complete"),
            Vec::new(),
            file_part(name, bytes),
        );
        let response: MessageResponse = self.client.authorized(role, request).await?;
        tracing::info!(%task_id, %role, "task completed");
        let refresh = if role == Role::Intern {
            Refresh::InternTasks
        } else {
            Refresh::StudentDashboard
        };
        Ok(SubmissionReceipt {
            message: response.message.unwrap_or_else(|| "Task submitted".into()),
            refresh,
        })
    }
}

fn checked(
    result: Result<UploadName, lms_core::upload::UploadError>,
) -> Result<UploadName, ServiceError> {
    result.map_err(|err| {
        tracing::warn!(error = %err, "upload rejected");
        ServiceError::Upload(err)
    })
}

async fn read_file(path: &Path) -> Result<Vec<u8>, ServiceError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| ServiceError::File {
            path: path.display().to_string(),
            source,
        })
}

fn file_part(name: UploadName, bytes: Vec<u8>) -> FilePart {
    FilePart {
        field: "file",
        file_name: name.file_name().to_owned(),
        bytes,
    }
}
