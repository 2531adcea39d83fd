use dioxus::prelude::*;
use dioxus_router::{Navigator, use_navigator};
use services::ServiceError;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// The page is leaving for the login screen.
    SessionExpired,
    Message(String),
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::Unknown => "Something went wrong. Please try again.",
            ViewError::SessionExpired => "Your session has expired. Please sign in again.",
            ViewError::Message(message) => message,
        }
    }
}

impl From<ServiceError> for ViewError {
    fn from(err: ServiceError) -> Self {
        if err.needs_login() {
            ViewError::SessionExpired
        } else {
            ViewError::Message(err.to_string())
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

/// Follows a page change a service asked for, if any.
pub fn follow_redirect(ctx: &AppContext, navigator: &Navigator) -> bool {
    match ctx.take_redirect() {
        Some(page) => {
            tracing::info!(?page, "following service redirect");
            let _ = navigator.replace(Route::for_page(page));
            true
        }
        None => false,
    }
}

/// Rendered in place of a page whose session expired.
#[component]
pub fn SessionRedirect() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    use_effect(move || {
        if !follow_redirect(&ctx, &navigator) {
            let _ = navigator.replace(Route::Login {});
        }
    });
    rsx! {
        p { class: "muted", "{ViewError::SessionExpired.message()}" }
    }
}

/// Page body for a failed load.
#[component]
pub fn LoadError(error: ViewError, on_retry: Option<EventHandler<()>>) -> Element {
    if error == ViewError::SessionExpired {
        return rsx! { SessionRedirect {} };
    }
    rsx! {
        div { class: "error",
            p { "{error.message()}" }
            if let Some(on_retry) = on_retry {
                button { r#type: "button", onclick: move |_| on_retry.call(()), "Retry" }
            }
        }
    }
}

/// One-off message, shown until dismissed.
#[component]
pub fn NoticeBanner(message: String) -> Element {
    let mut visible = use_signal(|| true);
    if !visible() {
        return rsx! {};
    }
    rsx! {
        div { class: "notice",
            span { "{message}" }
            button { r#type: "button", onclick: move |_| visible.set(false), "Dismiss" }
        }
    }
}
