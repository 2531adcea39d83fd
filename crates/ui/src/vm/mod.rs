mod certificate_vm;
mod dashboard_vm;
mod quiz_vm;
mod resource_vm;
mod submission_vm;
mod task_vm;
mod time_fmt;

pub use certificate_vm::{CertificateEntryVm, CertificatePanelVm, CertificateTarget};
pub use dashboard_vm::{
    CourseSectionVm, InternStatsVm, ProgressBarVm, StudentSummaryVm, map_progress_bars,
};
pub use quiz_vm::{
    OptionVm, QuestionVm, QuizCardVm, QuizResultVm, TrainerQuizRowVm, map_questions,
    map_quiz_cards, submit_caption,
};
pub use resource_vm::{MentorVm, ResourceVm, map_resources};
pub use submission_vm::{SubmissionRowVm, map_submission_rows};
pub use task_vm::{
    ActionVm, AssignmentCardVm, CourseTaskVm, StateBadgeVm, TaskCardVm, TaskGroupVm,
    group_intern_tasks, map_assignment_cards,
};
pub use time_fmt::{format_due, format_week};
