mod course;
mod ids;
mod progress;
mod quiz;
mod role;
mod task;
mod trainer;
pub(crate) mod wire;

pub use ids::{
    AssignmentId, CourseId, InternshipId, ParseIdError, QuestionId, QuizId, ResourceId,
    SubmissionId, TaskId, UserId,
};
pub use wire::parse_calendar_date;

pub use course::{
    Course, CourseDashboard, Internship, Mentor, Resource, ResourceKind, enrollable_courses,
};
pub use progress::{Enrollment, InternStats, ProgressEntry, StudentDashboard, average_progress};
pub use quiz::{
    AnswerChoice, AnswerSheet, Question, Quiz, QuizAnswerError, QuizAvailability, QuizScore,
    QuizSubmission, QuizSummary,
};
pub use role::{Credentials, Role, RoleParseError};
pub use task::{Assignment, CourseTask, InternTask, SubmissionStatus};
pub use trainer::{
    AssignmentDraft, QuizResultRow, ScheduledItem, Submission, SubmissionSource,
    SubmissionUpdate, TrainerCourse, TrainerDashboard, TrainerInternship, TrainerQuiz,
    filter_by_task,
};
