use dioxus::prelude::*;
use dioxus_router::Link;
use lms_core::model::{Course, enrollable_courses};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{
    CertificatePanel, ProgressBar, StateBadge, UploadForm, UploadTarget,
};
use crate::views::state::{LoadError, NoticeBanner, ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    AssignmentCardVm, CertificatePanelVm, CourseSectionVm, CourseTaskVm, MentorVm, ProgressBarVm,
    StudentSummaryVm, map_progress_bars,
};

#[derive(Clone, Debug, PartialEq)]
struct StudentData {
    summary: StudentSummaryVm,
    bars: Vec<ProgressBarVm>,
    sections: Vec<CourseSectionVm>,
    certificate: CertificatePanelVm,
    mentors: Vec<MentorVm>,
    notice: Option<String>,
}

#[component]
pub fn StudentView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut upload = use_signal(|| None::<UploadTarget>);
    let mut flash = use_signal(|| None::<String>);

    let loader = ctx.clone();
    let mut resource = use_resource(move || {
        let ctx = loader.clone();
        async move {
            let student = ctx.student();
            let dashboard = student.dashboard().await?;
            let progress = student.progress().await?;
            let mentors = match student.mentors().await {
                Ok(mentors) => mentors,
                Err(err) if err.needs_login() => return Err(ViewError::from(err)),
                Err(err) => {
                    tracing::warn!(error = %err, "mentor list unavailable");
                    Vec::new()
                }
            };

            let today = ctx.today();
            let certificate = CertificatePanelVm::for_courses(&dashboard.courses);
            ctx.certificates()
                .celebrate_if_unlocked(certificate.is_unlocked())
                .await?;

            Ok(StudentData {
                summary: StudentSummaryVm::new(&dashboard, &progress),
                bars: map_progress_bars(&progress),
                sections: dashboard
                    .courses
                    .iter()
                    .map(|course| CourseSectionVm::new(course, today))
                    .collect(),
                certificate,
                mentors: mentors.iter().map(MentorVm::from).collect(),
                notice: ctx.take_notice(),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Student Dashboard" }
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
                    SummaryTiles { summary: data.summary }
                    section { class: "card",
                        h3 { "Progress" }
                        if data.bars.is_empty() {
                            p { class: "muted", "Enroll in a course to track progress." }
                        }
                        for bar in data.bars {
                            ProgressBar { bar }
                        }
                    }
                    for section in data.sections {
                        CourseSection {
                            section,
                            on_upload: move |target| upload.set(Some(target)),
                        }
                    }
                    CertificatePanel { panel: data.certificate }
                    if !data.mentors.is_empty() {
                        section { class: "card",
                            h3 { "Mentors" }
                            ul {
                                for mentor in data.mentors {
                                    li { class: "mentor",
                                        span { class: "avatar", "{mentor.initial}" }
                                        span { "{mentor.name}" }
                                        small { "{mentor.detail}" }
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
fn SummaryTiles(summary: StudentSummaryVm) -> Element {
    let overall = summary
        .overall_progress
        .map_or_else(|| "-".to_owned(), |percent| format!("{percent}%"));
    rsx! {
        div { class: "tiles",
            div { class: "tile", span { "Overall progress" } strong { "{overall}" } }
            div { class: "tile", span { "Pending" } strong { "{summary.pending}" } }
            div { class: "tile", span { "Study streak" } strong { "{summary.streak}" } }
            div { class: "tile", span { "Grade" } strong { "{summary.grade}" } }
        }
    }
}

#[component]
fn CourseSection(section: CourseSectionVm, on_upload: EventHandler<UploadTarget>) -> Element {
    rsx! {
        section { class: "card course",
            header { class: "course__header",
                h3 { "{section.name}" }
                span { "{section.percent}%" }
                if let Some(course_id) = section.course_id {
                    Link { to: Route::Resources { course_id: course_id.value() }, "Resources" }
                }
            }
            if section.is_empty() {
                p { class: "muted", "No assignments yet." }
            }
            for card in section.assignments {
                AssignmentCard { card, on_upload }
            }
            for task in section.tasks {
                CourseTaskCard { task, on_upload }
            }
        }
    }
}

#[component]
fn AssignmentCard(card: AssignmentCardVm, on_upload: EventHandler<UploadTarget>) -> Element {
    let mut show_feedback = use_signal(|| false);
    let target = UploadTarget::Assignment(card.id);
    let class = if card.dimmed { "work work--dimmed" } else { "work" };
    rsx! {
        article { class,
            div { class: "work__head",
                h4 { "{card.heading}" }
                StateBadge { badge: card.badge }
            }
            p { class: "muted", "{card.subtitle}" }
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
                div { class: "work__feedback",
                    if let Some(grade) = card.grade {
                        p { "Grade: {grade}" }
                    }
                    p { "{card.feedback}" }
                }
            }
        }
    }
}

#[component]
fn CourseTaskCard(task: CourseTaskVm, on_upload: EventHandler<UploadTarget>) -> Element {
    let mut show_feedback = use_signal(|| false);
    let target = UploadTarget::CourseTask(task.id);
    rsx! {
        article { class: "work",
            div { class: "work__head",
                h4 { "{task.title}" }
                StateBadge { badge: task.badge }
            }
            p { class: "muted", "{task.due}" }
            if let Some(action) = task.action {
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
                p { class: "work__feedback", "{task.feedback}" }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct CatalogueData {
    enrolled: Vec<Course>,
    open: Vec<Course>,
}

/// Enrolled courses plus the ones still open for enrollment.
#[component]
pub fn CourseCatalogueView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut flash = use_signal(|| None::<String>);

    let loader = ctx.clone();
    let mut resource = use_resource(move || {
        let student = loader.student();
        async move {
            let enrolled = student.my_courses().await?;
            let catalogue = student.available_courses().await?;
            let open = enrollable_courses(&catalogue, &enrolled)
                .into_iter()
                .cloned()
                .collect();
            Ok::<_, ViewError>(CatalogueData { enrolled, open })
        }
    });

    let enroll = move |course: Course| {
        let ctx = ctx.clone();
        spawn(async move {
            match ctx.student().enroll(course.id).await {
                Ok(message) => {
                    flash.set(Some(message));
                    resource.restart();
                }
                Err(err) => flash.set(Some(ViewError::from(err).message().to_owned())),
            }
        });
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Courses" }
            if let Some(message) = flash() {
                p { class: "flash", "{message}" }
            }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    section { class: "card",
                        h3 { "My courses" }
                        if data.enrolled.is_empty() {
                            p { class: "muted", "You are not enrolled in any course yet." }
                        }
                        ul {
                            for course in data.enrolled {
                                li {
                                    span { "{course.name}" }
                                    Link { to: Route::Resources { course_id: course.id.value() }, "Resources" }
                                }
                            }
                        }
                    }
                    section { class: "card",
                        h3 { "Available courses" }
                        if data.open.is_empty() {
                            p { class: "muted", "No other courses are open right now." }
                        }
                        ul {
                            for course in data.open {
                                li {
                                    span { "{course.name}" }
                                    if let Some(duration) = course.duration.clone() {
                                        small { "{duration}" }
                                    }
                                    button {
                                        r#type: "button",
                                        onclick: {
                                            let enroll = enroll.clone();
                                            let course = course.clone();
                                            move |_| enroll(course.clone())
                                        },
                                        "Enroll"
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
