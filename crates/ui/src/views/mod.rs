mod auth;
mod components;
mod intern;
mod quiz;
mod resources;
mod state;
mod student;
mod trainer;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth::{ForgotPasswordView, LoginView, RegisterView, ResetPasswordView};
pub use components::UploadTarget;
pub use intern::InternView;
pub use quiz::{QuizView, StudentQuizzesView};
pub use resources::ResourcesView;
pub use state::{ViewError, ViewState, follow_redirect, view_state_from_resource};
pub use student::{CourseCatalogueView, StudentView};
pub use trainer::{QuizResultsView, TrainerCourseView, TrainerInternshipView, TrainerView};
