//! Display state for anything that unlocks week by week.
//!
//! Assignments, course tasks and intern tasks all funnel through
//! [`derive_state`] so their labels never disagree.

use chrono::NaiveDate;

/// Normalized facts a record contributes to state derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockFacts<'a> {
    pub is_unlocked: bool,
    pub is_submitted: bool,
    pub is_rejected: bool,
    pub grade: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    /// A passed deadline opens a server-locked item for late submission.
    pub late_opens_lock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Locked,
    Unlocked,
    /// Past due and not yet submitted; still accepted.
    SubmitLate,
    Submitted,
    Graded(String),
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Resubmit,
    Submit,
    SubmitLate,
    ViewGrade,
    ViewStatus,
    None,
}

impl TaskState {
    #[must_use]
    pub fn action(&self) -> TaskAction {
        match self {
            TaskState::Rejected => TaskAction::Resubmit,
            TaskState::Graded(_) => TaskAction::ViewGrade,
            TaskState::Submitted => TaskAction::ViewStatus,
            TaskState::Unlocked => TaskAction::Submit,
            TaskState::SubmitLate => TaskAction::SubmitLate,
            TaskState::Locked => TaskAction::None,
        }
    }

    /// States in which an upload is allowed.
    #[must_use]
    pub fn accepts_upload(&self) -> bool {
        matches!(
            self,
            TaskState::Unlocked | TaskState::SubmitLate | TaskState::Rejected
        )
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskState::Submitted | TaskState::Graded(_))
    }
}

impl TaskAction {
    /// Button label, or `None` when nothing can be done.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            TaskAction::Resubmit => Some("Re-Submit"),
            TaskAction::Submit => Some("Submit"),
            TaskAction::SubmitLate => Some("Submit Late"),
            TaskAction::ViewGrade => Some("View Grade"),
            TaskAction::ViewStatus => Some("View Status"),
            TaskAction::None => None,
        }
    }
}

/// Derive the display state of a work item on `today`.
///
/// Precedence: rejected, then submitted (graded when a grade exists), then
/// the server's unlock flag. A passed deadline only turns an unlocked item
/// into `SubmitLate`; a locked item stays locked unless its facts set
/// `late_opens_lock`.
#[must_use]
pub fn derive_state(facts: UnlockFacts<'_>, today: NaiveDate) -> TaskState {
    if facts.is_rejected {
        return TaskState::Rejected;
    }
    if facts.is_submitted {
        return match facts.grade {
            Some(grade) => TaskState::Graded(grade.to_owned()),
            None => TaskState::Submitted,
        };
    }
    let overdue = facts.due_date.is_some_and(|due| today > due);
    match (facts.is_unlocked, overdue) {
        (true, true) => TaskState::SubmitLate,
        (true, false) => TaskState::Unlocked,
        (false, true) if facts.late_opens_lock => TaskState::SubmitLate,
        (false, _) => TaskState::Locked,
    }
}

/// Records that can report their unlock facts.
pub trait Unlockable {
    fn unlock_facts(&self) -> UnlockFacts<'_>;

    fn display_state(&self, today: NaiveDate) -> TaskState {
        derive_state(self.unlock_facts(), today)
    }
}
