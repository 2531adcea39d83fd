use std::sync::Arc;

use lms_core::model::Role;
use serde_json::json;

use super::test_harness::{StubBackend, ViewKind, setup_view_harness};

fn student_backend(progress: u32) -> Arc<StubBackend> {
    let backend = Arc::new(StubBackend::default());
    backend.ok(
        "student/dashboard",
        json!({
            "courses": [{
                "course": "Rust", "course_id": 1, "progress": progress,
                "assignments": [
                    {"id": 1, "title": "Essay", "week_number": 1, "due_date": "2023-11-01",
                     "is_unlocked": true, "is_data_revealed": true},
                    {"id": 2, "title": "Secret", "week_number": 2, "due_date": "2023-12-01"}
                ]
            }],
            "study_streak": 3
        }),
    );
    backend.ok(
        "student/progress",
        json!([{"course": "Rust", "progress": progress, "tasks_completed": 1, "total_tasks": 2}]),
    );
    backend.ok("mentors", json!([{"id": 3, "name": "Grace", "expertise": "Systems"}]));
    backend
}

#[tokio::test(flavor = "current_thread")]
async fn student_view_smoke_renders_weekly_assignments() {
    let mut harness =
        setup_view_harness(ViewKind::Student, student_backend(40), Some(Role::Student)).await;
    let html = harness.render_when("Assignment 1: Essay").await;

    assert!(html.contains("Assignment 1: Essay"), "missing heading in {html}");
    assert!(html.contains("Submit Late"), "missing late action in {html}");
    assert!(html.contains("Assignment 2"), "missing locked card in {html}");
    assert!(!html.contains("Secret"), "locked title leaked in {html}");
    assert!(html.contains("3 days"), "missing streak in {html}");
    assert!(html.contains("Grace"), "missing mentor in {html}");
    assert!(
        html.contains("Complete all assignments and quizzes"),
        "missing locked certificate hint in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn student_view_smoke_celebrates_unlocked_certificate() {
    let mut harness =
        setup_view_harness(ViewKind::Student, student_backend(100), Some(Role::Student)).await;
    let html = harness.render_when("Generate Certificate").await;

    assert!(html.contains("Generate Certificate"), "missing certificate button in {html}");
    assert!(
        html.contains("Congratulations! You have unlocked a certificate."),
        "missing celebration in {html}"
    );
    assert!(harness.notices.take().is_none(), "notice should be consumed by the view");
}

#[tokio::test(flavor = "current_thread")]
async fn student_view_smoke_reports_expired_session() {
    let backend = Arc::new(StubBackend::default());
    backend.fail("student/dashboard", 401);
    let mut harness = setup_view_harness(ViewKind::Student, backend, Some(Role::Student)).await;
    let html = harness.render_when("session has expired").await;

    assert!(html.contains("Your session has expired"), "missing expiry notice in {html}");
    assert!(!html.contains("Retry"), "expired session should not offer retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn intern_view_smoke_groups_tasks() {
    let backend = Arc::new(StubBackend::default());
    backend.ok("intern/stats", json!({"tasks_completed": 1, "tasks_pending": 2}));
    backend.ok(
        "tasks",
        json!([
            {"id": 4, "title": "API", "status": "Rejected", "internship_name": "Backend",
             "is_unlocked": true, "feedback": "Missing tests"},
            {"id": 5, "title": "Docs"}
        ]),
    );
    backend.ok("enrollments", json!([]));
    backend.ok("internships", json!([{"id": 8, "intern_name": "Frontend"}]));
    let mut harness = setup_view_harness(ViewKind::Intern, backend, Some(Role::Intern)).await;
    let html = harness.render_when("Backend").await;

    assert!(html.contains("Backend"), "missing program group in {html}");
    assert!(html.contains("General Tasks"), "missing default group in {html}");
    assert!(html.contains("Re-Submit Task"), "missing resubmit action in {html}");
    assert!(
        html.contains("Certificate Locked (2 tasks left)"),
        "missing stats gate in {html}"
    );
    assert!(html.contains("Frontend"), "missing open internship in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_counts_open_questions() {
    let backend = Arc::new(StubBackend::default());
    backend.ok(
        "student/quiz/7",
        json!({
            "id": 7, "title": "Ownership",
            "questions": [
                {"id": 1, "text": "What moves?", "option_a": "String", "option_b": "u8",
                 "option_c": "bool", "option_d": "char"},
                {"id": 2, "text": "What borrows?", "option_a": "&T", "option_b": "T",
                 "option_c": "Box<T>", "option_d": "Rc<T>"}
            ]
        }),
    );
    let mut harness = setup_view_harness(ViewKind::Quiz(7), backend, Some(Role::Student)).await;
    let html = harness.render_when("Ownership").await;

    assert!(html.contains("1. What moves?"), "missing question in {html}");
    assert!(html.contains("A. String"), "missing option in {html}");
    assert!(html.contains("2 questions left"), "missing caption in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn trainer_internship_view_smoke_lists_submissions() {
    let backend = Arc::new(StubBackend::default());
    backend.ok("trainer/internship/3/tasks", json!([{"id": 1, "title": "Week 1"}]));
    backend.ok(
        "trainer/internship/3/submissions",
        json!([{"submission_id": 9, "student_name": "Ada", "task_id": 1, "task_title": "Week 1",
                "file_url": "uploads/a.pdf", "status": "Pending"}]),
    );
    let mut harness = setup_view_harness(
        ViewKind::TrainerInternship(3),
        backend,
        Some(Role::Trainer),
    )
    .await;
    let html = harness.render_when("Open file").await;

    assert!(html.contains("All tasks"), "missing task filter in {html}");
    assert!(html.contains("Ada"), "missing student in {html}");
    assert!(html.contains("Open file"), "missing file action in {html}");
    assert!(html.contains("Approve"), "missing review action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn trainer_course_view_smoke_renders_sections() {
    let backend = Arc::new(StubBackend::default());
    backend.ok(
        "trainer/course/2/assignments",
        json!([{"id": 11, "title": "Intro", "week_number": 1, "due_date": "2023-11-20"}]),
    );
    backend.ok("trainer/course/2/submissions", json!([]));
    backend.ok(
        "trainer/course/2/quizzes",
        json!([{"id": 5, "title": "Basics", "question_count": 4}]),
    );
    let mut harness =
        setup_view_harness(ViewKind::TrainerCourse(2), backend, Some(Role::Trainer)).await;
    let html = harness.render_when("Basics").await;

    assert!(html.contains("Week 1: Intro"), "missing assignment in {html}");
    assert!(html.contains("Due: 20 Nov 2023"), "missing due date in {html}");
    assert!(html.contains("No submissions yet."), "missing empty table in {html}");
    assert!(html.contains("4 questions"), "missing quiz row in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_offers_every_role() {
    let mut harness =
        setup_view_harness(ViewKind::Login, Arc::new(StubBackend::default()), None).await;
    let html = harness.render_when("Sign in").await;

    for role in ["Student", "Intern", "Trainer"] {
        assert!(html.contains(role), "missing {role} in {html}");
    }
    assert!(!html.contains(">Admin<"), "admin offered in {html}");
    assert!(harness.redirects.take().is_none());
}
