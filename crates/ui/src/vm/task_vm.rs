use chrono::NaiveDate;
use lms_core::model::{Assignment, AssignmentId, CourseTask, InternTask, TaskId};
use lms_core::status::{TaskAction, TaskState, Unlockable};

use crate::vm::time_fmt::{format_due, format_week};

/// Colored pill shown next to a work item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBadgeVm {
    pub label: String,
    pub class: &'static str,
}

impl From<&TaskState> for StateBadgeVm {
    fn from(state: &TaskState) -> Self {
        let (label, class) = match state {
            TaskState::Locked => ("Locked".to_owned(), "badge badge--locked"),
            TaskState::Unlocked => ("Unlocked".to_owned(), "badge badge--open"),
            TaskState::SubmitLate => ("Overdue".to_owned(), "badge badge--late"),
            TaskState::Submitted => ("Submitted".to_owned(), "badge badge--done"),
            TaskState::Graded(grade) => (format!("Graded: {grade}"), "badge badge--done"),
            TaskState::Rejected => ("Rejected".to_owned(), "badge badge--rejected"),
        };
        Self { label, class }
    }
}

/// Primary button for a work item, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionVm {
    pub action: TaskAction,
    pub label: &'static str,
    pub opens_upload: bool,
}

fn action_for(state: &TaskState, overrides: &[(TaskAction, &'static str)]) -> Option<ActionVm> {
    let action = state.action();
    let label = overrides
        .iter()
        .find(|(candidate, _)| *candidate == action)
        .map(|(_, label)| *label)
        .or_else(|| action.label())?;
    Some(ActionVm {
        action,
        label,
        opens_upload: state.accepts_upload(),
    })
}

const FEEDBACK_PENDING: &str = "Wait for trainer feedback...";

//
// ─── INTERN TASKS ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskCardVm {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub week: Option<String>,
    pub due: String,
    pub state: TaskState,
    pub badge: StateBadgeVm,
    pub action: Option<ActionVm>,
    pub feedback: String,
}

impl TaskCardVm {
    #[must_use]
    pub fn new(task: &InternTask, today: NaiveDate) -> Self {
        let state = task.display_state(today);
        let action = action_for(
            &state,
            &[
                (TaskAction::Resubmit, "Re-Submit Task"),
                (TaskAction::Submit, "Mark Complete"),
            ],
        );
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            week: format_week(task.week_number),
            due: format_due(task.due_date),
            badge: StateBadgeVm::from(&state),
            action,
            state,
            feedback: task
                .feedback
                .clone()
                .unwrap_or_else(|| FEEDBACK_PENDING.to_owned()),
        }
    }
}

/// Intern tasks under one program heading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskGroupVm {
    pub name: String,
    pub cards: Vec<TaskCardVm>,
}

/// Group tasks by program, keeping the order the backend listed them in.
#[must_use]
pub fn group_intern_tasks(tasks: &[InternTask], today: NaiveDate) -> Vec<TaskGroupVm> {
    let mut groups: Vec<TaskGroupVm> = Vec::new();
    for task in tasks {
        let card = TaskCardVm::new(task, today);
        match groups.iter_mut().find(|group| group.name == task.group_name()) {
            Some(group) => group.cards.push(card),
            None => groups.push(TaskGroupVm {
                name: task.group_name().to_owned(),
                cards: vec![card],
            }),
        }
    }
    groups
}

//
// ─── COURSE ASSIGNMENTS ────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignmentCardVm {
    pub id: AssignmentId,
    pub heading: String,
    pub subtitle: String,
    pub dimmed: bool,
    pub state: TaskState,
    pub badge: StateBadgeVm,
    pub action: Option<ActionVm>,
    pub feedback: String,
    pub grade: Option<String>,
}

impl AssignmentCardVm {
    /// `position` numbers assignments the backend sent without a week.
    #[must_use]
    pub fn new(assignment: &Assignment, position: usize, today: NaiveDate) -> Self {
        let state = assignment.display_state(today);
        let week = assignment
            .week_number
            .map_or_else(|| (position + 1).to_string(), |week| week.to_string());
        let revealed = assignment.is_data_revealed || !matches!(state, TaskState::Locked);
        let heading = if revealed {
            format!("Assignment {week}: {}", assignment.title)
        } else {
            format!("Assignment {week}")
        };
        let subtitle = if revealed {
            format_due(assignment.due_date)
        } else {
            "This assignment is locked until the previous one is submitted.".to_owned()
        };
        Self {
            id: assignment.id,
            heading,
            subtitle,
            dimmed: !revealed,
            badge: StateBadgeVm::from(&state),
            action: action_for(&state, &[(TaskAction::Submit, "Submit Task")]),
            state,
            feedback: assignment
                .feedback
                .clone()
                .unwrap_or_else(|| FEEDBACK_PENDING.to_owned()),
            grade: assignment.grade.clone(),
        }
    }
}

/// Assignment cards ordered by week.
#[must_use]
pub fn map_assignment_cards(assignments: &[Assignment], today: NaiveDate) -> Vec<AssignmentCardVm> {
    let mut ordered: Vec<&Assignment> = assignments.iter().collect();
    ordered.sort_by_key(|assignment| assignment.week_number.unwrap_or(u32::MAX));
    ordered
        .into_iter()
        .enumerate()
        .map(|(position, assignment)| AssignmentCardVm::new(assignment, position, today))
        .collect()
}

//
// ─── COURSE TASKS ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseTaskVm {
    pub id: TaskId,
    pub title: String,
    pub due: String,
    pub state: TaskState,
    pub badge: StateBadgeVm,
    pub action: Option<ActionVm>,
    pub feedback: String,
}

impl CourseTaskVm {
    #[must_use]
    pub fn new(task: &CourseTask, today: NaiveDate) -> Self {
        let state = task.display_state(today);
        Self {
            id: task.id,
            title: task.title.clone(),
            due: format_due(task.due_date),
            badge: StateBadgeVm::from(&state),
            action: action_for(&state, &[(TaskAction::Submit, "Submit Task")]),
            state,
            feedback: task
                .feedback
                .clone()
                .unwrap_or_else(|| FEEDBACK_PENDING.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
    }

    fn assignment(json: &str) -> Assignment {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn overdue_open_assignment_offers_late_submission() {
        let card = AssignmentCardVm::new(
            &assignment(
                r#"{"id": 1, "title": "Essay", "week_number": 2, "due_date": "2023-11-01",
                    "is_unlocked": true, "is_data_revealed": true}"#,
            ),
            0,
            today(),
        );
        assert_eq!(card.state, TaskState::SubmitLate);
        let action = card.action.unwrap();
        assert_eq!(action.label, "Submit Late");
        assert!(action.opens_upload);
        assert_eq!(card.heading, "Assignment 2: Essay");
    }

    #[test]
    fn hidden_assignment_keeps_title_back() {
        let card = AssignmentCardVm::new(
            &assignment(r#"{"id": 3, "title": "Secret", "due_date": "2024-01-01"}"#),
            2,
            today(),
        );
        assert_eq!(card.heading, "Assignment 3");
        assert!(card.dimmed);
        assert!(card.action.is_none());
    }

    #[test]
    fn hidden_overdue_assignment_stays_locked() {
        let card = AssignmentCardVm::new(
            &assignment(
                r#"{"id": 3, "title": "Secret", "week_number": 3, "due_date": "2023-11-01",
                    "is_unlocked": false, "is_data_revealed": false}"#,
            ),
            2,
            today(),
        );
        assert_eq!(card.state, TaskState::Locked);
        assert_eq!(card.heading, "Assignment 3");
        assert!(!card.subtitle.contains("2023"));
        assert!(card.dimmed);
        assert!(card.action.is_none());
    }

    #[test]
    fn overdue_course_task_stays_submittable() {
        let task: CourseTask =
            serde_json::from_str(r#"{"id": 6, "title": "Lab", "due_date": "2023-11-01"}"#).unwrap();
        let card = CourseTaskVm::new(&task, today());
        assert_eq!(card.state, TaskState::SubmitLate);
        let action = card.action.unwrap();
        assert_eq!(action.label, "Submit Late");
        assert!(action.opens_upload);
    }

    #[test]
    fn locked_overdue_intern_task_offers_late_upload() {
        let task: InternTask = serde_json::from_str(
            r#"{"id": 7, "title": "Deploy", "is_unlocked": false, "due_date": "2023-11-01"}"#,
        )
        .unwrap();
        let card = TaskCardVm::new(&task, today());
        assert_eq!(card.state, TaskState::SubmitLate);
        assert!(card.action.unwrap().opens_upload);

        let upcoming: InternTask = serde_json::from_str(
            r#"{"id": 8, "title": "Demo", "is_unlocked": false, "due_date": "2024-01-01"}"#,
        )
        .unwrap();
        assert!(TaskCardVm::new(&upcoming, today()).action.is_none());
    }

    #[test]
    fn assignments_sort_by_week() {
        let list: Vec<Assignment> = serde_json::from_str(
            r#"[{"id": 2, "title": "B", "week_number": 2, "is_data_revealed": true},
                {"id": 1, "title": "A", "week_number": 1, "is_data_revealed": true}]"#,
        )
        .unwrap();
        let cards = map_assignment_cards(&list, today());
        assert_eq!(cards[0].id, AssignmentId::new(1));
    }

    #[test]
    fn rejected_intern_task_uses_task_wording() {
        let task: InternTask = serde_json::from_str(
            r#"{"id": 4, "title": "API", "status": "Rejected", "feedback": "Missing tests"}"#,
        )
        .unwrap();
        let card = TaskCardVm::new(&task, today());
        assert_eq!(card.action.unwrap().label, "Re-Submit Task");
        assert_eq!(card.badge.label, "Rejected");
        assert_eq!(card.feedback, "Missing tests");
    }

    #[test]
    fn graded_task_shows_grade_badge() {
        let task: InternTask =
            serde_json::from_str(r#"{"id": 5, "title": "Done", "status": "Completed", "grade": "A"}"#)
                .unwrap();
        let card = TaskCardVm::new(&task, today());
        assert_eq!(card.badge.label, "Graded: A");
        assert_eq!(card.action.unwrap().label, "View Grade");
    }

    #[test]
    fn tasks_group_by_program_in_order() {
        let tasks: Vec<InternTask> = serde_json::from_str(
            r#"[{"id": 1, "internship_name": "Backend"},
                {"id": 2},
                {"id": 3, "internship_name": "Backend"}]"#,
        )
        .unwrap();
        let groups = group_intern_tasks(&tasks, today());
        let names: Vec<_> = groups.iter().map(|group| group.name.as_str()).collect();
        assert_eq!(names, vec!["Backend", "General Tasks"]);
        assert_eq!(groups[0].cards.len(), 2);
    }
}
