use std::sync::Mutex;

use services::{Navigator, Notifier, Page};

mod desktop;

pub use desktop::DesktopLinkOpener;

/// Navigation requested by the services, picked up by the next view render.
#[derive(Default)]
pub struct PendingRedirect {
    page: Mutex<Option<Page>>,
}

impl PendingRedirect {
    #[must_use]
    pub fn take(&self) -> Option<Page> {
        self.page.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Navigator for PendingRedirect {
    fn navigate(&self, page: Page) {
        if let Ok(mut slot) = self.page.lock() {
            *slot = Some(page);
        }
    }
}

/// Holds the latest celebration message until a view shows it.
#[derive(Default)]
pub struct NoticeBoard {
    message: Mutex<Option<String>>,
}

impl NoticeBoard {
    #[must_use]
    pub fn take(&self) -> Option<String> {
        self.message.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Notifier for NoticeBoard {
    fn celebrate(&self, message: &str) {
        if let Ok(mut slot) = self.message.lock() {
            *slot = Some(message.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::Role;

    #[test]
    fn redirect_is_taken_once() {
        let pending = PendingRedirect::default();
        pending.navigate(Page::Dashboard(Role::Intern));
        pending.navigate(Page::Login);
        assert_eq!(pending.take(), Some(Page::Login));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn notice_is_taken_once() {
        let board = NoticeBoard::default();
        board.celebrate("Well done");
        assert_eq!(board.take().as_deref(), Some("Well done"));
        assert!(board.take().is_none());
    }
}
