//! Hooks the services call back into the front end through.

use std::sync::Arc;

use lms_core::model::Role;
use url::Url;

/// Top-level destinations a service may send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard(Role),
}

impl Page {
    #[must_use]
    pub fn home_for(role: Role) -> Self {
        Page::Dashboard(role)
    }
}

/// Moves the front end to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, page: Page);
}

/// Opens a document or link outside the client (browser, PDF viewer).
pub trait FileOpener: Send + Sync {
    /// # Errors
    ///
    /// Returns a human-readable reason when nothing could open the url.
    fn open(&self, url: &Url) -> Result<(), String>;
}

/// One-off celebratory or informational messages.
pub trait Notifier: Send + Sync {
    fn celebrate(&self, message: &str);
}

/// A notifier that ignores everything, for headless callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn celebrate(&self, _message: &str) {}
}

/// The front-end hooks handed to `AppServices`.
#[derive(Clone)]
pub struct Platform {
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub opener: Arc<dyn FileOpener>,
}
