use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ids::{AssignmentId, InternshipId, TaskId};
use crate::model::wire::{null_as_default, optional_date, optional_text};
use crate::status::{UnlockFacts, Unlockable};

//
// ─── SUBMISSION STATUS ─────────────────────────────────────────────────────────
//

/// Review status attached to a task or submission by the backend.
///
/// Unknown values are preserved verbatim so trainers still see what the
/// server said.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Completed,
    Approved,
    Graded,
    Rejected,
    Other(String),
}

impl SubmissionStatus {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Completed => "Completed",
            SubmissionStatus::Approved => "Approved",
            SubmissionStatus::Graded => "Graded",
            SubmissionStatus::Rejected => "Rejected",
            SubmissionStatus::Other(raw) => raw,
        }
    }

    /// Statuses that mean the work has been handed in and accepted for review.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Completed | SubmissionStatus::Approved | SubmissionStatus::Graded
        )
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, SubmissionStatus::Rejected)
    }
}

impl From<String> for SubmissionStatus {
    fn from(raw: String) -> Self {
        match raw.trim() {
            "" | "Pending" => SubmissionStatus::Pending,
            "Completed" => SubmissionStatus::Completed,
            "Approved" => SubmissionStatus::Approved,
            "Graded" => SubmissionStatus::Graded,
            "Rejected" => SubmissionStatus::Rejected,
            _ => SubmissionStatus::Other(raw),
        }
    }
}

impl From<SubmissionStatus> for String {
    fn from(status: SubmissionStatus) -> Self {
        status.as_str().to_owned()
    }
}

//
// ─── INTERN TASK ───────────────────────────────────────────────────────────────
//

/// Weekly task assigned to an intern (`GET /api/tasks`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InternTask {
    pub id: TaskId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_unlocked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SubmissionStatus,
    #[serde(default, deserialize_with = "optional_text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub feedback: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub internship_name: Option<String>,
    #[serde(default)]
    pub internship_id: Option<InternshipId>,
}

impl InternTask {
    /// Group heading for task lists.
    #[must_use]
    pub fn group_name(&self) -> &str {
        self.internship_name.as_deref().unwrap_or("General Tasks")
    }
}

// Intern tasks open for late submission once their deadline passes, even
// while the server still reports them locked.
impl Unlockable for InternTask {
    fn unlock_facts(&self) -> UnlockFacts<'_> {
        UnlockFacts {
            is_unlocked: self.is_unlocked,
            is_submitted: self.status.is_done(),
            is_rejected: self.status.is_rejected(),
            grade: self.grade.as_deref(),
            due_date: self.due_date,
            late_opens_lock: true,
        }
    }
}

//
// ─── COURSE ASSIGNMENT ─────────────────────────────────────────────────────────
//

/// Weekly assignment inside a student's course dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub week_number: Option<u32>,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_unlocked: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_submitted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_data_revealed: bool,
    #[serde(default, deserialize_with = "optional_text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub feedback: Option<String>,
}

impl Unlockable for Assignment {
    fn unlock_facts(&self) -> UnlockFacts<'_> {
        UnlockFacts {
            is_unlocked: self.is_unlocked,
            is_submitted: self.is_submitted,
            is_rejected: false,
            grade: self.grade.as_deref(),
            due_date: self.due_date,
            late_opens_lock: false,
        }
    }
}

//
// ─── COURSE TASK ───────────────────────────────────────────────────────────────
//

/// Task attached to a course in the student dashboard.
///
/// Course tasks carry no unlock flag; they are actionable until submitted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CourseTask {
    pub id: TaskId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: SubmissionStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_submitted: bool,
    #[serde(default, deserialize_with = "optional_text")]
    pub grade: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub feedback: Option<String>,
}

impl Unlockable for CourseTask {
    fn unlock_facts(&self) -> UnlockFacts<'_> {
        UnlockFacts {
            is_unlocked: true,
            is_submitted: self.is_submitted,
            is_rejected: self.status.is_rejected(),
            grade: self.grade.as_deref(),
            due_date: self.due_date,
            late_opens_lock: false,
        }
    }
}
