use chrono::NaiveDate;
use lms_core::certificate::StatsGate;
use lms_core::model::{
    CourseDashboard, CourseId, InternStats, ProgressEntry, StudentDashboard, average_progress,
};

use crate::vm::task_vm::{AssignmentCardVm, CourseTaskVm, map_assignment_cards};

/// Header tiles of the student dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentSummaryVm {
    pub overall_progress: Option<u8>,
    pub pending: u32,
    pub streak: String,
    pub grade: String,
}

impl StudentSummaryVm {
    #[must_use]
    pub fn new(dashboard: &StudentDashboard, progress: &[ProgressEntry]) -> Self {
        Self {
            overall_progress: average_progress(progress),
            pending: dashboard.pending_count(),
            streak: dashboard
                .study_streak
                .map_or_else(|| "-".to_owned(), |days| format!("{days} days")),
            grade: dashboard
                .overall_grade
                .clone()
                .unwrap_or_else(|| "-".to_owned()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressBarVm {
    pub label: String,
    pub percent: u8,
    pub detail: String,
}

#[must_use]
pub fn map_progress_bars(entries: &[ProgressEntry]) -> Vec<ProgressBarVm> {
    entries
        .iter()
        .map(|entry| ProgressBarVm {
            label: entry.course.clone(),
            percent: clamp_percent(entry.progress),
            detail: format!("{}/{} completed", entry.tasks_completed, entry.total_tasks),
        })
        .collect()
}

/// One course block in the weekly breakdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseSectionVm {
    pub course_id: Option<CourseId>,
    pub name: String,
    pub percent: u8,
    pub assignments: Vec<AssignmentCardVm>,
    pub tasks: Vec<CourseTaskVm>,
}

impl CourseSectionVm {
    #[must_use]
    pub fn new(course: &CourseDashboard, today: NaiveDate) -> Self {
        Self {
            course_id: course.course_id,
            name: course.course.clone(),
            percent: clamp_percent(course.progress),
            assignments: map_assignment_cards(&course.assignments, today),
            tasks: course
                .tasks
                .iter()
                .map(|task| CourseTaskVm::new(task, today))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.tasks.is_empty()
    }
}

/// Intern stats card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternStatsVm {
    pub completed: u32,
    pub pending: u32,
    pub percent: u8,
    pub streak: u32,
    pub mentor: String,
    pub certificate: StatsGate,
}

impl From<&InternStats> for InternStatsVm {
    fn from(stats: &InternStats) -> Self {
        Self {
            completed: stats.tasks_completed,
            pending: stats.tasks_pending,
            percent: clamp_percent(stats.overall_progress),
            streak: stats.current_streak,
            mentor: stats
                .mentor_name
                .clone()
                .unwrap_or_else(|| "Not assigned".to_owned()),
            certificate: StatsGate::from_stats(stats),
        }
    }
}

impl InternStatsVm {
    #[must_use]
    pub fn certificate_label(&self) -> String {
        match self.certificate {
            StatsGate::Unlocked => "Download Certificate".to_owned(),
            StatsGate::Locked { remaining } => {
                format!("Certificate Locked ({remaining} tasks left)")
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_outstanding_work() {
        let dashboard: StudentDashboard = serde_json::from_str(
            r#"{"courses": [
                    {"course": "Rust", "total_assignments": 4, "assignments_completed": 1,
                     "pending_quizzes_count": 2, "total_tasks": 1, "tasks_completed": 3}
                ], "study_streak": 5}"#,
        )
        .unwrap();
        let progress: Vec<ProgressEntry> =
            serde_json::from_str(r#"[{"course": "Rust", "progress": 49.6}]"#).unwrap();

        let summary = StudentSummaryVm::new(&dashboard, &progress);
        assert_eq!(summary.pending, 5);
        assert_eq!(summary.overall_progress, Some(50));
        assert_eq!(summary.streak, "5 days");
        assert_eq!(summary.grade, "-");
    }

    #[test]
    fn intern_stats_gate_label() {
        let stats: InternStats =
            serde_json::from_str(r#"{"tasks_completed": 3, "tasks_pending": 2}"#).unwrap();
        let vm = InternStatsVm::from(&stats);
        assert_eq!(vm.certificate_label(), "Certificate Locked (2 tasks left)");
        assert_eq!(vm.mentor, "Not assigned");
    }

    #[test]
    fn progress_bars_cap_at_full() {
        let entries: Vec<ProgressEntry> = serde_json::from_str(
            r#"[{"course": "SQL", "progress": 130, "tasks_completed": 4, "total_tasks": 4}]"#,
        )
        .unwrap();
        let bars = map_progress_bars(&entries);
        assert_eq!(bars[0].percent, 100);
        assert_eq!(bars[0].detail, "4/4 completed");
    }
}
