use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use lms_core::Clock;
use lms_core::model::{Credentials, Role};
use storage::repository::{CredentialRecord, CredentialRepository};

use crate::error::{GuardError, ServiceError};
use crate::platform::{Navigator, Page};

/// Owns the stored session and the one place that reacts to expiry.
///
/// A `401` from any request clears the session and sends the user to the
/// login page. The redirect happens once per signed-in session even when
/// several loaders fail at the same time; loaders that run after the
/// session is gone fail with `GuardError::MissingSession` quietly.
/// Page guards (`require`) redirect on their own and never use up the
/// expiry redirect.
pub struct SessionGuard {
    clock: Clock,
    credentials: Arc<dyn CredentialRepository>,
    navigator: Arc<dyn Navigator>,
    redirect_pending: AtomicBool,
}

impl SessionGuard {
    #[must_use]
    pub fn new(
        clock: Clock,
        credentials: Arc<dyn CredentialRepository>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            clock,
            credentials,
            navigator,
            redirect_pending: AtomicBool::new(true),
        }
    }

    /// The stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the credential store cannot be read.
    pub async fn current(&self) -> Result<Option<Credentials>, ServiceError> {
        let record = self.credentials.load().await?;
        Ok(record.map(CredentialRecord::into_credentials))
    }

    /// Require a stored session with `role`; otherwise go to the login page.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::MissingSession` when nobody is signed in and
    /// `GuardError::RoleMismatch` when the stored role differs.
    pub async fn require(&self, role: Role) -> Result<Credentials, ServiceError> {
        let Some(credentials) = self.current().await? else {
            self.navigator.navigate(Page::Login);
            return Err(GuardError::MissingSession.into());
        };
        if credentials.role != role {
            self.navigator.navigate(Page::Login);
            return Err(GuardError::RoleMismatch {
                expected: role,
                found: credentials.role,
            }
            .into());
        }
        Ok(credentials)
    }

    /// Store a fresh session and re-arm the expiry redirect.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session cannot be written.
    pub async fn establish(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        let record = CredentialRecord::from_credentials(credentials, self.clock.now());
        self.credentials.save(&record).await?;
        self.redirect_pending.store(true, Ordering::Release);
        tracing::info!(role = %credentials.role, "session stored");
        Ok(())
    }

    /// React to a `401`: forget the session and redirect, at most once.
    ///
    /// Always yields `ServiceError::SessionExpired` for the caller to return.
    pub async fn expire(&self) -> ServiceError {
        if let Err(err) = self.credentials.clear().await {
            tracing::error!(error = %err, "failed to clear expired session");
        }
        tracing::warn!("session expired");
        self.redirect_once();
        ServiceError::SessionExpired
    }

    fn redirect_once(&self) {
        if self.redirect_pending.swap(false, Ordering::AcqRel) {
            self.navigator.navigate(Page::Login);
        }
    }

    /// Forget the session and go to the login page.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Storage` if the session cannot be cleared.
    pub async fn logout(&self) -> Result<(), ServiceError> {
        self.credentials.clear().await?;
        tracing::info!("signed out");
        self.navigator.navigate(Page::Login);
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use lms_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    #[derive(Default)]
    pub(crate) struct RecordingNavigator {
        pub pages: Mutex<Vec<Page>>,
    }

    impl RecordingNavigator {
        pub(crate) fn pages(&self) -> Vec<Page> {
            self.pages.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, page: Page) {
            self.pages.lock().unwrap().push(page);
        }
    }

    fn guard() -> (SessionGuard, Arc<RecordingNavigator>, InMemoryRepository) {
        let repo = InMemoryRepository::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let guard = SessionGuard::new(fixed_clock(), Arc::new(repo.clone()), navigator.clone());
        (guard, navigator, repo)
    }

    #[tokio::test]
    async fn require_redirects_without_session() {
        let (guard, navigator, _) = guard();
        let err = guard.require(Role::Student).await.unwrap_err();
        assert!(matches!(err, ServiceError::Guard(GuardError::MissingSession)));
        assert_eq!(navigator.pages(), vec![Page::Login]);
    }

    #[tokio::test]
    async fn require_rejects_other_roles() {
        let (guard, navigator, _) = guard();
        guard
            .establish(&Credentials::new("t", Role::Intern, "Grace"))
            .await
            .unwrap();

        let err = guard.require(Role::Trainer).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Guard(GuardError::RoleMismatch {
                expected: Role::Trainer,
                found: Role::Intern
            })
        ));
        assert_eq!(navigator.pages(), vec![Page::Login]);
        assert_eq!(guard.require(Role::Intern).await.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn expire_clears_and_redirects_once() {
        let (guard, navigator, repo) = guard();
        guard
            .establish(&Credentials::new("t", Role::Student, "Ada"))
            .await
            .unwrap();

        for _ in 0..3 {
            assert!(matches!(guard.expire().await, ServiceError::SessionExpired));
        }
        assert!(repo.load().await.unwrap().is_none());
        assert_eq!(navigator.pages(), vec![Page::Login]);

        guard
            .establish(&Credentials::new("t2", Role::Student, "Ada"))
            .await
            .unwrap();
        let _ = guard.expire().await;
        assert_eq!(navigator.pages(), vec![Page::Login, Page::Login]);
    }

    #[tokio::test]
    async fn role_mismatch_leaves_expiry_redirect_armed() {
        let (guard, navigator, repo) = guard();
        guard
            .establish(&Credentials::new("t", Role::Student, "Ada"))
            .await
            .unwrap();

        assert!(guard.require(Role::Trainer).await.is_err());
        assert_eq!(navigator.pages(), vec![Page::Login]);

        let _ = guard.expire().await;
        assert!(repo.load().await.unwrap().is_none());
        assert_eq!(navigator.pages(), vec![Page::Login, Page::Login]);
    }
}
