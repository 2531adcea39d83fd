use std::path::PathBuf;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use lms_core::certificate::CertificateAffordance;
use lms_core::model::{AssignmentId, TaskId};
use services::SubmissionReceipt;

use crate::context::AppContext;
use crate::views::state::{ViewError, follow_redirect};
use crate::vm::{
    CertificateEntryVm, CertificatePanelVm, CertificateTarget, ProgressBarVm, StateBadgeVm,
};

/// What an open upload form will submit against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadTarget {
    Assignment(AssignmentId),
    CourseTask(TaskId),
    InternTask(TaskId),
}

#[component]
pub fn StateBadge(badge: StateBadgeVm) -> Element {
    rsx! {
        span { class: badge.class, "{badge.label}" }
    }
}

#[component]
pub fn ProgressBar(bar: ProgressBarVm) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress__label",
                span { "{bar.label}" }
                span { "{bar.percent}%" }
            }
            div { class: "progress__track",
                div { class: "progress__fill", style: "width: {bar.percent}%" }
            }
            small { "{bar.detail}" }
        }
    }
}

/// File picker for one submission. Accepts a path typed or pasted by the user.
#[component]
pub fn UploadForm(
    target: UploadTarget,
    on_done: EventHandler<SubmissionReceipt>,
    on_cancel: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut path = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let raw = path.read().trim().to_owned();
        if raw.is_empty() {
            error.set(Some("Please choose a file".to_owned()));
            return;
        }
        let ctx = ctx.clone();
        busy.set(true);
        spawn(async move {
            let file = PathBuf::from(raw);
            let submissions = ctx.submissions();
            let result = match target {
                UploadTarget::Assignment(id) => submissions.submit_assignment(id, &file).await,
                UploadTarget::CourseTask(id) => submissions.submit_course_task(id, &file).await,
                UploadTarget::InternTask(id) => submissions.complete_task(id, &file).await,
            };
            busy.set(false);
            match result {
                Ok(receipt) => {
                    error.set(None);
                    path.set(String::new());
                    on_done.call(receipt);
                }
                Err(err) => {
                    follow_redirect(&ctx, &navigator);
                    error.set(Some(ViewError::from(err).message().to_owned()));
                }
            }
        });
    };

    rsx! {
        form { class: "upload", onsubmit: submit,
            label { r#for: "upload-path", "File (pdf, doc, ppt, xls, txt, zip)" }
            input {
                id: "upload-path",
                r#type: "text",
                placeholder: "/path/to/answer.pdf",
                value: "{path}",
                oninput: move |evt| path.set(evt.value()),
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            div { class: "upload__actions",
                button { r#type: "submit", disabled: busy(), "Upload" }
                button { r#type: "button", onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

/// Certificate card for a student or intern dashboard.
#[component]
pub fn CertificatePanel(panel: CertificatePanelVm) -> Element {
    match panel {
        CertificatePanelVm::Hidden => rsx! {},
        CertificatePanelVm::Locked { hint } => rsx! {
            section { class: "card certificate certificate--locked",
                h3 { "Certificate" }
                p { "{hint}" }
            }
        },
        CertificatePanelVm::Unlocked(entries) => rsx! {
            section { class: "card certificate",
                h3 { "Certificate" }
                ul {
                    for entry in entries {
                        CertificateRow { entry }
                    }
                }
            }
        },
    }
}

#[component]
fn CertificateRow(entry: CertificateEntryVm) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut status = use_signal(|| None::<String>);
    let label = entry.button_label();
    let target = entry.target;
    let download_link = match &entry.affordance {
        CertificateAffordance::Download { url } => Some(url.clone()),
        CertificateAffordance::Generate => None,
    };

    let open = move |_| {
        let ctx = ctx.clone();
        let download_link = download_link.clone();
        let Some(target) = target else {
            status.set(Some("This certificate is not available yet.".to_owned()));
            return;
        };
        spawn(async move {
            let certificates = ctx.certificates();
            let result = match target {
                CertificateTarget::Course(course_id) => {
                    certificates
                        .open_course_certificate(course_id, download_link.as_deref())
                        .await
                }
                CertificateTarget::Internship(internship_id) => {
                    certificates
                        .open_internship_certificate(Some(internship_id))
                        .await
                }
            };
            match result {
                Ok(url) => status.set(Some(format!("Opened {url}"))),
                Err(err) => {
                    follow_redirect(&ctx, &navigator);
                    status.set(Some(ViewError::from(err).message().to_owned()));
                }
            }
        });
    };

    rsx! {
        li { class: "certificate__row",
            span { "{entry.name}" }
            button { r#type: "button", onclick: open, "{label}" }
            if let Some(message) = status() {
                small { "{message}" }
            }
        }
    }
}
