use dioxus::prelude::*;
use dioxus_router::use_navigator;
use lms_core::certificate::StatsGate;
use lms_core::model::{Internship, InternshipId};

use crate::context::AppContext;
use crate::views::components::{CertificatePanel, StateBadge, UploadForm, UploadTarget};
use crate::views::state::{
    LoadError, NoticeBanner, ViewError, ViewState, follow_redirect, view_state_from_resource,
};
use crate::vm::{CertificatePanelVm, InternStatsVm, TaskCardVm, TaskGroupVm, group_intern_tasks};

#[derive(Clone, Debug, PartialEq)]
struct InternData {
    stats: InternStatsVm,
    groups: Vec<TaskGroupVm>,
    certificate: CertificatePanelVm,
    open_programs: Vec<Internship>,
    notice: Option<String>,
}

#[component]
pub fn InternView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut upload = use_signal(|| None::<UploadTarget>);
    let mut flash = use_signal(|| None::<String>);

    let loader = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = loader.clone();
        async move {
            let intern = ctx.intern();
            let stats = intern.stats().await?;
            let tasks = intern.tasks().await?;
            let enrollments = intern.enrollments().await?;
            let open_programs = intern.available_internships().await?;

            let certificate = CertificatePanelVm::for_enrollments(&enrollments);
            let stats = InternStatsVm::from(&stats);
            ctx.certificates()
                .celebrate_if_unlocked(
                    certificate.is_unlocked() || stats.certificate == StatsGate::Unlocked,
                )
                .await?;

            Ok::<_, ViewError>(InternData {
                stats,
                groups: group_intern_tasks(&tasks, ctx.today()),
                certificate,
                open_programs,
                notice: ctx.take_notice(),
            })
        }
    });

    let enroll = {
        let ctx = ctx.clone();
        move |internship_id: InternshipId| {
            let ctx = ctx.clone();
            spawn(async move {
                match ctx.intern().enroll(internship_id).await {
                    Ok(message) => {
                        flash.set(Some(message));
                        resource.restart();
                    }
                    Err(err) => flash.set(Some(ViewError::from(err).message().to_owned())),
                }
            });
        }
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Intern Dashboard" }
            if let Some(message) = flash() {
                p { class: "flash", "{message}" }
            }
            if let Some(target) = upload() {
                UploadForm {
                    target,
                    on_done: move |receipt: services::SubmissionReceipt| {
                        flash.set(Some(receipt.message));
                        upload.set(None);
                        resource.restart();
                    },
                    on_cancel: move |()| upload.set(None),
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if let Some(message) = data.notice {
                        NoticeBanner { message }
                    }
                    StatsCard { stats: data.stats }
                    if data.groups.is_empty() {
                        p { class: "muted", "No tasks assigned yet." }
                    }
                    for group in data.groups {
                        section { class: "card",
                            h3 { "{group.name}" }
                            for card in group.cards {
                                TaskCard {
                                    card,
                                    on_upload: move |target| upload.set(Some(target)),
                                }
                            }
                        }
                    }
                    CertificatePanel { panel: data.certificate }
                    if !data.open_programs.is_empty() {
                        section { class: "card",
                            h3 { "Open internships" }
                            ul {
                                for program in data.open_programs {
                                    li {
                                        span { "{program.intern_name}" }
                                        if let Some(mentor) = program.mentor_name.clone() {
                                            small { "Mentor: {mentor}" }
                                        }
                                        button {
                                            r#type: "button",
                                            onclick: {
                                                let enroll = enroll.clone();
                                                let id = program.id;
                                                move |_| enroll(id)
                                            },
                                            "Enroll"
                                        }
                                    }
                                }
                            }
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
fn StatsCard(stats: InternStatsVm) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut status = use_signal(|| None::<String>);
    let unlocked = stats.certificate == StatsGate::Unlocked;
    let label = stats.certificate_label();

    let download = move |_| {
        let ctx = ctx.clone();
        spawn(async move {
            match ctx.certificates().open_internship_certificate(None).await {
                Ok(url) => status.set(Some(format!("Opened {url}"))),
                Err(err) => {
                    follow_redirect(&ctx, &navigator);
                    status.set(Some(ViewError::from(err).message().to_owned()));
                }
            }
        });
    };

    rsx! {
        section { class: "card tiles",
            div { class: "tile", span { "Completed" } strong { "{stats.completed}" } }
            div { class: "tile", span { "Pending" } strong { "{stats.pending}" } }
            div { class: "tile", span { "Progress" } strong { "{stats.percent}%" } }
            div { class: "tile", span { "Streak" } strong { "{stats.streak}" } }
            div { class: "tile", span { "Mentor" } strong { "{stats.mentor}" } }
            button { r#type: "button", disabled: !unlocked, onclick: download, "{label}" }
            if let Some(message) = status() {
                small { "{message}" }
            }
        }
    }
}

#[component]
fn TaskCard(card: TaskCardVm, on_upload: EventHandler<UploadTarget>) -> Element {
    let mut show_feedback = use_signal(|| false);
    let target = UploadTarget::InternTask(card.id);
    rsx! {
        article { class: "work",
            div { class: "work__head",
                h4 { "{card.title}" }
                StateBadge { badge: card.badge }
            }
            if let Some(week) = card.week {
                small { "{week}" }
            }
            if let Some(description) = card.description {
                p { "{description}" }
            }
            p { class: "muted", "{card.due}" }
            if let Some(action) = card.action {
                if action.opens_upload {
                    button { r#type: "button", onclick: move |_| on_upload.call(target), "{action.label}" }
                } else {
                    button {
                        r#type: "button",
                        onclick: move |_| show_feedback.toggle(),
                        "{action.label}"
                    }
                }
            }
            if show_feedback() {
                p { class: "work__feedback", "{card.feedback}" }
            }
        }
    }
}
