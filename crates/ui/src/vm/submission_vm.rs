use lms_core::model::{Submission, SubmissionId, SubmissionSource, SubmissionStatus, TaskId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionRowVm {
    pub id: SubmissionId,
    pub source: SubmissionSource,
    pub task_id: Option<TaskId>,
    pub student: String,
    pub work: String,
    pub status: String,
    pub status_class: &'static str,
    pub grade: String,
    pub feedback: String,
    pub has_file: bool,
    pub file_link: Option<String>,
}

impl From<&Submission> for SubmissionRowVm {
    fn from(submission: &Submission) -> Self {
        let status_class = match submission.status {
            SubmissionStatus::Approved | SubmissionStatus::Graded | SubmissionStatus::Completed => {
                "badge badge--done"
            }
            SubmissionStatus::Rejected => "badge badge--rejected",
            SubmissionStatus::Pending | SubmissionStatus::Other(_) => "badge badge--open",
        };
        Self {
            id: submission.submission_id,
            source: submission.source(),
            task_id: submission.task_id,
            student: submission.student_name.clone(),
            work: submission.work_title().unwrap_or("-").to_owned(),
            status: submission.status.as_str().to_owned(),
            status_class,
            grade: submission.grade.clone().unwrap_or_default(),
            feedback: submission.feedback.clone().unwrap_or_default(),
            has_file: !submission.file_url.trim().is_empty(),
            file_link: None,
        }
    }
}

impl SubmissionRowVm {
    #[must_use]
    pub fn with_file_link(mut self, link: Option<String>) -> Self {
        self.file_link = link;
        self
    }
}

/// Rows for the review table; `link` resolves each uploaded file.
#[must_use]
pub fn map_submission_rows(
    submissions: &[&Submission],
    link: impl Fn(&Submission) -> Option<String>,
) -> Vec<SubmissionRowVm> {
    submissions
        .iter()
        .map(|submission| SubmissionRowVm::from(*submission).with_file_link(link(submission)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_submission_row() {
        let submission: Submission = serde_json::from_str(
            r#"{"submission_id": 4, "student_name": "Ada", "task_id": 2, "task_title": "Week 2",
                "file_url": "", "status": "Rejected", "grade": 40}"#,
        )
        .unwrap();
        let row = SubmissionRowVm::from(&submission);
        assert_eq!(row.source, SubmissionSource::InternTask);
        assert_eq!(row.work, "Week 2");
        assert_eq!(row.status, "Rejected");
        assert_eq!(row.grade, "40");
        assert!(!row.has_file);
    }
}
