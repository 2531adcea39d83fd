use std::sync::Arc;

use lms_core::model::{Course, CourseId, Credentials, Internship, InternshipId, Role};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{ApiClient, MessageResponse};
use crate::error::{ApiError, ServiceError};
use crate::transport::ApiRequest;

const INVALID_LOGIN: &str = "Invalid credentials or role mismatch";
const EMAIL_NOT_REGISTERED: &str = "Email not registered";

/// What a new account is attached to at sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationTarget {
    Course(CourseId),
    Internship(InternshipId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub target: Option<RegistrationTarget>,
}

#[derive(Serialize)]
struct RegistrationBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    course_id: Option<CourseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    internship_id: Option<InternshipId>,
}

impl Registration {
    /// Students must pick a course and interns an internship.
    fn validate(&self) -> Result<RegistrationBody<'_>, ServiceError> {
        if [&self.name, &self.email, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(ServiceError::Validation("Please fill all fields".into()));
        }
        let (course_id, internship_id) = match (self.role, self.target) {
            (Role::Student, Some(RegistrationTarget::Course(id))) => (Some(id), None),
            (Role::Student, _) => {
                return Err(ServiceError::Validation("Please select a course".into()));
            }
            (Role::Intern, Some(RegistrationTarget::Internship(id))) => (None, Some(id)),
            (Role::Intern, _) => {
                return Err(ServiceError::Validation(
                    "Please select an internship".into(),
                ));
            }
            _ => (None, None),
        };
        Ok(RegistrationBody {
            name: self.name.trim(),
            email: self.email.trim(),
            password: &self.password,
            role: self.role,
            course_id,
            internship_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetRequestOutcome {
    LinkSent,
    /// The address has no account; the caller should offer registration.
    NotRegistered,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

/// Sign-in, sign-up and password recovery, plus the public catalogue.
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Sign in and store the session.
    ///
    /// Succeeds only when the backend confirms the role the user selected.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for empty fields, bad credentials
    /// or a role mismatch, and `ServiceError::Api` when the server is unreachable.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<Credentials, ServiceError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::Validation("Please fill all fields".into()));
        }
        if !role.can_sign_in() {
            return Err(ServiceError::Validation(format!(
                "{} accounts cannot sign in here",
                role.label()
            )));
        }

        let request = ApiRequest::post(
            "auth/login",
            json!({ "email": email.trim(), "password": password }),
        );
        let response: LoginResponse = match self.client.public(request).await {
            Ok(response) => response,
            Err(ServiceError::Api(ApiError::Unauthorized | ApiError::Rejected { .. })) => {
                return Err(ServiceError::Validation(INVALID_LOGIN.into()));
            }
            Err(err) => return Err(err),
        };

        let confirmed_role = response.role.as_deref().and_then(|raw| raw.parse::<Role>().ok());
        let (Some(token), Some(found)) = (response.token, confirmed_role) else {
            return Err(ServiceError::Validation(INVALID_LOGIN.into()));
        };
        if found != role {
            tracing::warn!(selected = %role, %found, "login role mismatch");
            return Err(ServiceError::Validation(INVALID_LOGIN.into()));
        }

        let credentials = Credentials::new(token, found, response.name.unwrap_or_default());
        self.client.guard().establish(&credentials).await?;
        tracing::info!(role = %found, "signed in");
        Ok(credentials)
    }

    /// Create an account. Returns the server's confirmation text.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when required fields are missing and
    /// `ServiceError::Api` when the backend refuses the registration.
    pub async fn register(&self, registration: &Registration) -> Result<String, ServiceError> {
        let body = registration.validate()?;
        let body = serde_json::to_value(body)
            .map_err(|err| ServiceError::Api(ApiError::Decode(err)))?;
        let response: MessageResponse = self
            .client
            .public(ApiRequest::post("auth/register", body))
            .await?;
        Ok(response
            .message
            .unwrap_or_else(|| "Registration successful. Please login.".into()))
    }

    /// Ask for a password reset link.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` for an empty email and
    /// `ServiceError::Api` for other backend failures.
    pub async fn forgot_password(&self, email: &str) -> Result<ResetRequestOutcome, ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::Validation("Please enter email".into()));
        }
        let request = ApiRequest::post("auth/forgot-password", json!({ "email": email.trim() }));
        match self.client.public::<MessageResponse>(request).await {
            Ok(_) => Ok(ResetRequestOutcome::LinkSent),
            Err(ServiceError::Api(ApiError::Rejected { message, .. }))
                if message == EMAIL_NOT_REGISTERED =>
            {
                Ok(ResetRequestOutcome::NotRegistered)
            }
            Err(err) => Err(err),
        }
    }

    /// Set a new password using the token from the reset email.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` when the token is missing or the two
    /// passwords differ, and `ServiceError::Api` when the backend refuses.
    pub async fn reset_password(
        &self,
        token: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), ServiceError> {
        if token.trim().is_empty() {
            return Err(ServiceError::Validation(
                "Invalid or missing reset token".into(),
            ));
        }
        if password.is_empty() || confirm.is_empty() {
            return Err(ServiceError::Validation("Please fill all fields".into()));
        }
        if password != confirm {
            return Err(ServiceError::Validation("Passwords do not match".into()));
        }
        let request = ApiRequest::post(
            "auth/reset-password",
            json!({ "token": token.trim(), "password": password }),
        );
        self.client.public::<MessageResponse>(request).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session cannot be cleared.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.client.guard().logout().await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session cannot be read.
    pub async fn current_session(&self) -> Result<Option<Credentials>, ServiceError> {
        self.client.guard().current().await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Api` on transport or decode failures.
    pub async fn courses(&self) -> Result<Vec<Course>, ServiceError> {
        self.client.public(ApiRequest::get("courses")).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Api` on transport or decode failures.
    pub async fn internships(&self) -> Result<Vec<Internship>, ServiceError> {
        self.client.public(ApiRequest::get("internships")).await
    }
}
