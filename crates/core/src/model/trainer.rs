use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ids::{AssignmentId, CourseId, InternshipId, QuizId, SubmissionId, TaskId};
use crate::model::task::SubmissionStatus;
use crate::model::wire::{null_as_default, optional_date, optional_text};

//
// ─── DASHBOARD ─────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainerCourse {
    pub course_id: CourseId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub course_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub students: u32,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default)]
    pub assignment_limit: Option<u32>,
    #[serde(default)]
    pub quiz_limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainerInternship {
    pub internship_id: InternshipId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub intern_name: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub duration: Option<String>,
    #[serde(default)]
    pub assignment_limit: Option<u32>,
}

/// Payload of `GET /api/trainer/dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TrainerDashboard {
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<TrainerCourse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub internships: Vec<TrainerInternship>,
}

impl TrainerDashboard {
    #[must_use]
    pub fn total_students(&self) -> u32 {
        self.courses.iter().map(|course| course.students).sum()
    }
}

//
// ─── SCHEDULED WORK ────────────────────────────────────────────────────────────
//

/// Assignment or internship-task template as listed to its trainer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduledItem {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
}

impl ScheduledItem {
    #[must_use]
    pub fn assignment_id(&self) -> AssignmentId {
        AssignmentId::new(self.id)
    }

    #[must_use]
    pub fn task_id(&self) -> TaskId {
        TaskId::new(self.id)
    }
}

/// Body for creating (`POST /trainer/assign`) or editing
/// (`PUT /trainer/assignment/{id}`) an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl AssignmentDraft {
    /// Title is required; surrounding whitespace is dropped.
    #[must_use]
    pub fn new(title: &str, due_date: Option<NaiveDate>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            course_id: None,
            title: title.to_owned(),
            due_date,
        })
    }

    #[must_use]
    pub fn for_course(mut self, course_id: CourseId) -> Self {
        self.course_id = Some(course_id);
        self
    }
}

//
// ─── SUBMISSIONS ───────────────────────────────────────────────────────────────
//

/// Which update endpoint a submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionSource {
    /// Student course assignment (`/trainer/submission/update`).
    Assignment,
    /// Intern task (`/trainer/task_submission/update`).
    InternTask,
}

/// A submission as seen from the review table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub submission_id: SubmissionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_url: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default, deserialize_with = "optional_text")]
    pub task_title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub assignment_title: Option<String>,
}

impl Submission {
    #[must_use]
    pub fn source(&self) -> SubmissionSource {
        if self.task_id.is_some() || self.task_title.is_some() {
            SubmissionSource::InternTask
        } else {
            SubmissionSource::Assignment
        }
    }

    /// Title of the work item, whichever kind it is.
    #[must_use]
    pub fn work_title(&self) -> Option<&str> {
        self.task_title
            .as_deref()
            .or(self.assignment_title.as_deref())
    }
}

/// Narrow a submission list to one task; `None` keeps everything.
#[must_use]
pub fn filter_by_task(submissions: &[Submission], task: Option<TaskId>) -> Vec<&Submission> {
    submissions
        .iter()
        .filter(|submission| task.is_none_or(|wanted| submission.task_id == Some(wanted)))
        .collect()
}

/// Review decision sent by a trainer. Omitted fields are left untouched server side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionUpdate {
    pub submission_id: SubmissionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SubmissionStatus>,
}

impl SubmissionUpdate {
    #[must_use]
    pub fn new(submission_id: SubmissionId) -> Self {
        Self {
            submission_id,
            grade: None,
            feedback: None,
            status: None,
        }
    }

    #[must_use]
    pub fn approve(mut self) -> Self {
        self.status = Some(SubmissionStatus::Approved);
        self
    }

    #[must_use]
    pub fn reject(mut self) -> Self {
        self.status = Some(SubmissionStatus::Rejected);
        self
    }

    #[must_use]
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    #[must_use]
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

//
// ─── QUIZZES ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrainerQuiz {
    pub id: QuizId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "optional_text")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizResultRow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub student_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u32,
    #[serde(default, deserialize_with = "optional_text")]
    pub submitted_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submissions() -> Vec<Submission> {
        serde_json::from_str(
            r#"[
                {"submission_id": 1, "student_name": "Ada", "task_id": 7, "task_title": "Week 1", "file_url": "uploads/a.pdf", "status": "Completed"},
                {"submission_id": 2, "student_name": "Linus", "task_id": 8, "task_title": "Week 2", "file_url": "uploads/b.pdf", "status": null},
                {"submission_id": 3, "student_name": "Grace", "task_id": 7, "task_title": "Week 1", "file_url": "", "grade": 88}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn filter_by_task_keeps_matching_rows() {
        let all = submissions();
        let week_one = filter_by_task(&all, Some(TaskId::new(7)));
        let names: Vec<_> = week_one.iter().map(|s| s.student_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
        assert_eq!(filter_by_task(&all, None).len(), 3);
    }

    #[test]
    fn source_follows_task_fields() {
        let all = submissions();
        assert_eq!(all[0].source(), SubmissionSource::InternTask);

        let course: Submission = serde_json::from_str(
            r#"{"submission_id": 5, "student_name": "Bo", "assignment_title": "Essay", "file_url": "x.pdf"}"#,
        )
        .unwrap();
        assert_eq!(course.source(), SubmissionSource::Assignment);
        assert_eq!(course.work_title(), Some("Essay"));
    }

    #[test]
    fn update_omits_untouched_fields() {
        let update = SubmissionUpdate::new(SubmissionId::new(3))
            .with_grade("A")
            .reject();
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"submission_id": 3, "grade": "A", "status": "Rejected"})
        );
    }

    #[test]
    fn draft_requires_title() {
        assert!(AssignmentDraft::new("   ", None).is_none());
        let draft = AssignmentDraft::new(" Essay ", None)
            .unwrap()
            .for_course(CourseId::new(2));
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body, serde_json::json!({"course_id": 2, "title": "Essay"}));
    }
}
