#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth_service;
pub mod certificate_service;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod intern_service;
pub mod platform;
pub mod student_service;
pub mod submission_service;
pub mod trainer_service;
pub mod transport;

#[cfg(test)]
mod testing;

pub use lms_core::Clock;

pub use app_services::AppServices;
pub use auth_service::{AuthService, Registration, RegistrationTarget, ResetRequestOutcome};
pub use certificate_service::CertificateService;
pub use config::{ApiConfig, DEFAULT_API_BASE};
pub use error::{ApiError, AppServicesError, GuardError, ServiceError};
pub use guard::SessionGuard;
pub use intern_service::InternService;
pub use platform::{FileOpener, Navigator, Notifier, Page, Platform, SilentNotifier};
pub use student_service::{CourseQuizzes, ResolvedResource, StudentService};
pub use submission_service::{Refresh, SubmissionReceipt, SubmissionService};
pub use trainer_service::TrainerService;
pub use transport::{ApiRequest, ApiTransport, Body, FilePart, HttpTransport, Method};
