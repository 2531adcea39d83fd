use dioxus::prelude::*;
use lms_core::model::CourseId;
use url::Url;

use crate::context::AppContext;
use crate::views::state::{LoadError, ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResourceVm, map_resources};

#[component]
pub fn ResourcesView(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let student = ctx.student();
    let mut resource = use_resource(move || {
        let student = student.clone();
        async move {
            let items = student.resources(CourseId::new(course_id)).await?;
            Ok::<_, ViewError>(map_resources(&items))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Course Resources" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(items) => rsx! {
                    if items.is_empty() {
                        p { class: "muted", "No resources have been shared for this course." }
                    }
                    ul { class: "resources",
                        for item in items {
                            ResourceRow { item }
                        }
                    }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

#[component]
fn ResourceRow(item: ResourceVm) -> Element {
    let ctx = use_context::<AppContext>();
    let mut failure = use_signal(|| None::<String>);
    let link = item.url.clone();
    let open = move |_| {
        let opened = Url::parse(&link)
            .map_err(|err| err.to_string())
            .and_then(|url| ctx.opener().open(&url));
        if let Err(reason) = opened {
            tracing::warn!(%reason, url = %link, "could not open resource");
            failure.set(Some(reason));
        }
    };
    rsx! {
        li { class: "resource",
            span { class: item.icon }
            span { "{item.title}" }
            small { "{item.kind}" }
            button { r#type: "button", onclick: open, "Open" }
            if let Some(reason) = failure() {
                small { class: "error", "{reason}" }
            }
        }
    }
}
