use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use lms_core::model::{
    AssignmentDraft, CourseId, InternshipId, QuizId, ScheduledItem, SubmissionUpdate, TaskId,
    TrainerDashboard, filter_by_task, parse_calendar_date,
};
use url::Url;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::state::{
    LoadError, ViewError, ViewState, follow_redirect, view_state_from_resource,
};
use crate::vm::{
    QuizResultVm, SubmissionRowVm, TrainerQuizRowVm, format_due, map_submission_rows,
};

#[component]
pub fn TrainerView() -> Element {
    let ctx = use_context::<AppContext>();
    let trainer = ctx.trainer();
    let mut resource = use_resource(move || {
        let trainer = trainer.clone();
        async move { Ok::<TrainerDashboard, ViewError>(trainer.dashboard().await?) }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Trainer Dashboard" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(dashboard) => rsx! {
                    div { class: "tiles",
                        div { class: "tile", span { "Courses" } strong { "{dashboard.courses.len()}" } }
                        div { class: "tile", span { "Internships" } strong { "{dashboard.internships.len()}" } }
                        div { class: "tile", span { "Students" } strong { "{dashboard.total_students()}" } }
                    }
                    section { class: "card",
                        h3 { "Courses" }
                        if dashboard.courses.is_empty() {
                            p { class: "muted", "No courses assigned." }
                        }
                        ul {
                            for course in dashboard.courses {
                                li {
                                    Link {
                                        to: Route::TrainerCourse { course_id: course.course_id.value() },
                                        "{course.course_name}"
                                    }
                                    small { " {course.students} students" }
                                }
                            }
                        }
                    }
                    section { class: "card",
                        h3 { "Internships" }
                        if dashboard.internships.is_empty() {
                            p { class: "muted", "No internships assigned." }
                        }
                        ul {
                            for internship in dashboard.internships {
                                li {
                                    Link {
                                        to: Route::TrainerInternship {
                                            internship_id: internship.internship_id.value(),
                                        },
                                        "{internship.intern_name}"
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

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
struct CourseData {
    assignments: Vec<ScheduledItem>,
    submissions: Vec<SubmissionRowVm>,
    quizzes: Vec<TrainerQuizRowVm>,
}

#[component]
pub fn TrainerCourseView(course_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let course_id = CourseId::new(course_id);
    let mut flash = use_signal(|| None::<String>);
    let mut title = use_signal(String::new);
    let mut due = use_signal(String::new);

    let trainer = ctx.trainer();
    let mut resource = use_resource(move || {
        let trainer = trainer.clone();
        async move {
            let assignments = trainer.assignments(course_id).await?;
            let submissions = trainer.course_submissions(course_id).await?;
            let quizzes = trainer.quizzes(course_id).await?;
            let refs: Vec<_> = submissions.iter().collect();
            Ok::<_, ViewError>(CourseData {
                assignments,
                submissions: map_submission_rows(&refs, |submission| {
                    trainer
                        .submission_file(submission)
                        .ok()
                        .map(|url| url.to_string())
                }),
                quizzes: quizzes.iter().map(TrainerQuizRowVm::from).collect(),
            })
        }
    });

    let report = move |ctx: &AppContext, outcome: Result<String, services::ServiceError>| {
        let mut flash = flash;
        let mut resource = resource;
        match outcome {
            Ok(message) => {
                flash.set(Some(message));
                resource.restart();
            }
            Err(err) => {
                follow_redirect(ctx, &navigator);
                flash.set(Some(ViewError::from(err).message().to_owned()));
            }
        }
    };

    let create = {
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let due_date = parse_calendar_date(&due.read());
            let Some(draft) = AssignmentDraft::new(&title.read(), due_date) else {
                flash.set(Some("Please enter a title".to_owned()));
                return;
            };
            let ctx = ctx.clone();
            spawn(async move {
                let outcome = ctx.trainer().create_assignment(course_id, draft).await;
                if outcome.is_ok() {
                    title.set(String::new());
                    due.set(String::new());
                }
                report(&ctx, outcome);
            });
        }
    };

    let delete_assignment = {
        let ctx = ctx.clone();
        move |item: ScheduledItem| {
            let ctx = ctx.clone();
            spawn(async move {
                let outcome = ctx
                    .trainer()
                    .delete_assignment(item.assignment_id())
                    .await
                    .map(|()| format!("Deleted {}", item.title));
                report(&ctx, outcome);
            });
        }
    };

    let delete_quiz = {
        let ctx = ctx.clone();
        move |quiz_id: QuizId| {
            let ctx = ctx.clone();
            spawn(async move {
                let outcome = ctx
                    .trainer()
                    .delete_quiz(quiz_id)
                    .await
                    .map(|()| "Quiz deleted".to_owned());
                report(&ctx, outcome);
            });
        }
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            Link { to: Route::Trainer {}, "Back to dashboard" }
            h2 { "Course {course_id}" }
            if let Some(message) = flash() {
                p { class: "flash", "{message}" }
            }
            form { class: "card", onsubmit: create,
                h3 { "New assignment" }
                input {
                    r#type: "text",
                    placeholder: "Title",
                    value: "{title}",
                    oninput: move |evt| title.set(evt.value()),
                }
                input {
                    r#type: "date",
                    value: "{due}",
                    oninput: move |evt| due.set(evt.value()),
                }
                button { r#type: "submit", "Create" }
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
                        h3 { "Assignments" }
                        if data.assignments.is_empty() {
                            p { class: "muted", "No assignments yet." }
                        }
                        ul {
                            for item in data.assignments {
                                AssignmentRow {
                                    item: item.clone(),
                                    on_saved: move |message: String| {
                                        flash.set(Some(message));
                                        resource.restart();
                                    },
                                    on_delete: {
                                        let delete_assignment = delete_assignment.clone();
                                        let item = item.clone();
                                        move |()| delete_assignment(item.clone())
                                    },
                                }
                            }
                        }
                    }
                    SubmissionTable {
                        rows: data.submissions,
                        on_reviewed: move |message: String| {
                            flash.set(Some(message));
                            resource.restart();
                        },
                    }
                    section { class: "card",
                        h3 { "Quizzes" }
                        if data.quizzes.is_empty() {
                            p { class: "muted", "No quizzes yet." }
                        }
                        table {
                            tbody {
                                for quiz in data.quizzes {
                                    tr {
                                        td { "{quiz.title}" }
                                        td { "{quiz.week}" }
                                        td { "{quiz.deadline}" }
                                        td { "{quiz.questions}" }
                                        td {
                                            Link { to: Route::QuizResults { quiz_id: quiz.id.value() }, "Results" }
                                        }
                                        td {
                                            button {
                                                r#type: "button",
                                                onclick: {
                                                    let delete_quiz = delete_quiz.clone();
                                                    let quiz_id = quiz.id;
                                                    move |_| delete_quiz(quiz_id)
                                                },
                                                "Delete"
                                            }
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
fn AssignmentRow(
    item: ScheduledItem,
    on_saved: EventHandler<String>,
    on_delete: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut editing = use_signal(|| false);
    let mut title = use_signal({
        let initial = item.title.clone();
        move || initial
    });
    let mut due = use_signal(move || item.due_date.map(|date| date.to_string()).unwrap_or_default());
    let mut error = use_signal(|| None::<String>);
    let assignment_id = item.assignment_id();

    let save = move |_| {
        let due_date = parse_calendar_date(&due.read());
        let Some(draft) = AssignmentDraft::new(&title.read(), due_date) else {
            error.set(Some("Please enter a title".to_owned()));
            return;
        };
        let ctx = ctx.clone();
        spawn(async move {
            match ctx.trainer().update_assignment(assignment_id, draft).await {
                Ok(()) => {
                    editing.set(false);
                    error.set(None);
                    on_saved.call("Assignment updated".to_owned());
                }
                Err(err) => {
                    follow_redirect(&ctx, &navigator);
                    error.set(Some(ViewError::from(err).message().to_owned()));
                }
            }
        });
    };

    let week = item
        .week_number
        .map_or_else(String::new, |week| format!("Week {week}: "));
    let due_label = format_due(item.due_date);

    rsx! {
        li { class: "assignment",
            if editing() {
                input { r#type: "text", value: "{title}", oninput: move |evt| title.set(evt.value()) }
                input { r#type: "date", value: "{due}", oninput: move |evt| due.set(evt.value()) }
                button { r#type: "button", onclick: save, "Save" }
                button { r#type: "button", onclick: move |_| editing.set(false), "Cancel" }
            } else {
                span { "{week}{item.title}" }
                small { " {due_label}" }
                button { r#type: "button", onclick: move |_| editing.set(true), "Edit" }
                button { r#type: "button", onclick: move |_| on_delete.call(()), "Delete" }
            }
            if let Some(message) = error() {
                small { class: "error", "{message}" }
            }
        }
    }
}

//
// ─── INTERNSHIP ────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
struct InternshipData {
    tasks: Vec<ScheduledItem>,
    submissions: Vec<lms_core::model::Submission>,
}

#[component]
pub fn TrainerInternshipView(internship_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let internship_id = InternshipId::new(internship_id);
    let mut flash = use_signal(|| None::<String>);
    let mut task_filter = use_signal(|| None::<TaskId>);

    let trainer = ctx.trainer();
    let mut resource = use_resource(move || {
        let trainer = trainer.clone();
        async move {
            let tasks = trainer.internship_tasks(internship_id).await?;
            let submissions = trainer.internship_submissions(internship_id).await?;
            Ok::<_, ViewError>(InternshipData { tasks, submissions })
        }
    });

    let state = view_state_from_resource(&resource);
    let rows = match &state {
        ViewState::Ready(data) => {
            let trainer = ctx.trainer();
            map_submission_rows(&filter_by_task(&data.submissions, task_filter()), |submission| {
                trainer
                    .submission_file(submission)
                    .ok()
                    .map(|url| url.to_string())
            })
        }
        _ => Vec::new(),
    };

    rsx! {
        div { class: "page",
            Link { to: Route::Trainer {}, "Back to dashboard" }
            h2 { "Internship {internship_id}" }
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
                        h3 { "Tasks" }
                        select {
                            onchange: move |evt| {
                                task_filter.set(evt.value().parse::<TaskId>().ok());
                            },
                            option { value: "", "All tasks" }
                            for task in data.tasks {
                                option {
                                    value: "{task.id}",
                                    selected: task_filter() == Some(task.task_id()),
                                    "{task.title}"
                                }
                            }
                        }
                    }
                    SubmissionTable {
                        rows: rows.clone(),
                        on_reviewed: move |message: String| {
                            flash.set(Some(message));
                            resource.restart();
                        },
                    }
                },
                ViewState::Error(error) => rsx! {
                    LoadError { error, on_retry: move |()| resource.restart() }
                },
            }
        }
    }
}

//
// ─── REVIEW ────────────────────────────────────────────────────────────────────
//

#[component]
fn SubmissionTable(rows: Vec<SubmissionRowVm>, on_reviewed: EventHandler<String>) -> Element {
    rsx! {
        section { class: "card",
            h3 { "Submissions" }
            if rows.is_empty() {
                p { class: "muted", "No submissions yet." }
            }
            table { class: "submissions",
                thead {
                    tr {
                        th { "Student" }
                        th { "Work" }
                        th { "File" }
                        th { "Status" }
                        th { "Review" }
                    }
                }
                tbody {
                    for row in rows {
                        ReviewRow { key: "{row.id}", row: row.clone(), on_reviewed }
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: SubmissionRowVm, on_reviewed: EventHandler<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut grade = use_signal({
        let initial = row.grade.clone();
        move || initial
    });
    let mut feedback = use_signal({
        let initial = row.feedback.clone();
        move || initial
    });
    let mut error = use_signal(|| None::<String>);
    let source = row.source;
    let submission_id = row.id;

    let send = {
        let ctx = ctx.clone();
        move |decision: Option<bool>| {
            let mut update = SubmissionUpdate::new(submission_id);
            let typed_grade = grade.read().trim().to_owned();
            if !typed_grade.is_empty() {
                update = update.with_grade(typed_grade);
            }
            let typed_feedback = feedback.read().trim().to_owned();
            if !typed_feedback.is_empty() {
                update = update.with_feedback(typed_feedback);
            }
            update = match decision {
                Some(true) => update.approve(),
                Some(false) => update.reject(),
                None => update,
            };
            let ctx = ctx.clone();
            spawn(async move {
                match ctx.trainer().review(source, &update).await {
                    Ok(()) => {
                        error.set(None);
                        on_reviewed.call("Submission updated".to_owned());
                    }
                    Err(err) => {
                        follow_redirect(&ctx, &navigator);
                        error.set(Some(ViewError::from(err).message().to_owned()));
                    }
                }
            });
        }
    };

    let open = {
        let link = row.file_link.clone();
        move |_| {
            let Some(link) = link.clone() else {
                error.set(Some("No file attached".to_owned()));
                return;
            };
            let opened = Url::parse(&link)
                .map_err(|err| err.to_string())
                .and_then(|url| ctx.opener().open(&url));
            if let Err(reason) = opened {
                error.set(Some(reason));
            }
        }
    };

    rsx! {
        tr {
            td { "{row.student}" }
            td { "{row.work}" }
            td {
                if row.has_file {
                    button { r#type: "button", onclick: open, "Open file" }
                } else {
                    span { class: "muted", "-" }
                }
            }
            td { span { class: row.status_class, "{row.status}" } }
            td {
                input {
                    r#type: "text",
                    placeholder: "Grade",
                    value: "{grade}",
                    oninput: move |evt| grade.set(evt.value()),
                }
                input {
                    r#type: "text",
                    placeholder: "Feedback",
                    value: "{feedback}",
                    oninput: move |evt| feedback.set(evt.value()),
                }
                button {
                    r#type: "button",
                    onclick: {
                        let send = send.clone();
                        move |_| send(Some(true))
                    },
                    "Approve"
                }
                button {
                    r#type: "button",
                    onclick: {
                        let send = send.clone();
                        move |_| send(Some(false))
                    },
                    "Reject"
                }
                button {
                    r#type: "button",
                    onclick: {
                        let send = send.clone();
                        move |_| send(None)
                    },
                    "Save"
                }
                if let Some(message) = error() {
                    small { class: "error", "{message}" }
                }
            }
        }
    }
}

//
// ─── QUIZ RESULTS ──────────────────────────────────────────────────────────────
//

#[component]
pub fn QuizResultsView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let trainer = ctx.trainer();
    let mut resource = use_resource(move || {
        let trainer = trainer.clone();
        async move {
            let rows = trainer.quiz_results(QuizId::new(quiz_id)).await?;
            Ok::<_, ViewError>(rows.iter().map(QuizResultVm::from).collect::<Vec<_>>())
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            Link { to: Route::Trainer {}, "Back to dashboard" }
            h2 { "Quiz Results" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "muted", "No attempts yet." }
                    }
                    table {
                        tbody {
                            for row in rows {
                                tr {
                                    td { "{row.student}" }
                                    td { "{row.score}" }
                                    td { "{row.submitted_at}" }
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
