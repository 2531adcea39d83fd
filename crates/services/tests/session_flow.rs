use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lms_core::model::{Role, TaskId};
use lms_core::status::{TaskState, Unlockable};
use lms_core::time::fixed_now;
use serde_json::{Value, json};
use services::{
    ApiConfig, ApiError, ApiRequest, ApiTransport, AppServices, Clock, FileOpener, Navigator,
    Page, Platform, ServiceError, SilentNotifier,
};
use storage::repository::Storage;
use url::Url;

#[derive(Default)]
struct ScriptedBackend {
    routes: Mutex<HashMap<String, Result<Value, u16>>>,
    hits: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn ok(&self, path: &str, body: Value) {
        self.routes.lock().unwrap().insert(path.into(), Ok(body));
    }

    fn fail(&self, path: &str, status: u16) {
        self.routes.lock().unwrap().insert(path.into(), Err(status));
    }

    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedBackend {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        self.hits.lock().unwrap().push(request.path.clone());
        match self.routes.lock().unwrap().get(&request.path).cloned() {
            Some(Ok(body)) => Ok(body),
            Some(Err(401)) => Err(ApiError::Unauthorized),
            Some(Err(status)) => Err(ApiError::Rejected {
                status,
                message: "rejected".into(),
            }),
            None => Err(ApiError::Rejected {
                status: 404,
                message: format!("no route for {}", request.path),
            }),
        }
    }
}

#[derive(Default)]
struct Pages(Mutex<Vec<Page>>);

impl Navigator for Pages {
    fn navigate(&self, page: Page) {
        self.0.lock().unwrap().push(page);
    }
}

struct NoOpener;

impl FileOpener for NoOpener {
    fn open(&self, _url: &Url) -> Result<(), String> {
        Ok(())
    }
}

fn platform(pages: &Arc<Pages>) -> Platform {
    Platform {
        navigator: pages.clone(),
        notifier: Arc::new(SilentNotifier),
        opener: Arc::new(NoOpener),
    }
}

fn build(backend: &Arc<ScriptedBackend>, storage: Storage, pages: &Arc<Pages>) -> AppServices {
    AppServices::with_transport(
        backend.clone(),
        ApiConfig::new("http://127.0.0.1:5005").unwrap(),
        storage,
        Clock::fixed(fixed_now()),
        platform(pages),
    )
}

#[tokio::test]
async fn expired_session_redirects_once_and_login_recovers() {
    let backend = Arc::new(ScriptedBackend::default());
    let pages = Arc::new(Pages::default());
    let app = build(&backend, Storage::in_memory(), &pages);

    backend.ok(
        "auth/login",
        json!({"token": "jwt-1", "role": "STUDENT", "name": "Ada"}),
    );
    backend.ok("student/dashboard", json!([{"course": "Rust 101"}]));
    app.auth()
        .login("ada@x.io", "pw", Role::Student)
        .await
        .unwrap();
    assert_eq!(app.student().dashboard().await.unwrap().courses.len(), 1);

    backend.fail("student/dashboard", 401);
    backend.fail("student/progress", 401);
    let student = app.student();
    let (first, second) = tokio::join!(student.dashboard(), student.progress());
    assert!(first.unwrap_err().needs_login());
    assert!(second.unwrap_err().needs_login());
    assert_eq!(pages.0.lock().unwrap().as_slice(), [Page::Login]);
    assert!(app.auth().current_session().await.unwrap().is_none());

    backend.ok("student/dashboard", json!({"courses": []}));
    app.auth()
        .login("ada@x.io", "pw", Role::Student)
        .await
        .unwrap();
    assert!(app.student().dashboard().await.is_ok());
}

#[tokio::test]
async fn wrong_role_page_then_expiry_still_redirects() {
    let backend = Arc::new(ScriptedBackend::default());
    let pages = Arc::new(Pages::default());
    let app = build(&backend, Storage::in_memory(), &pages);

    backend.ok(
        "auth/login",
        json!({"token": "jwt-1", "role": "STUDENT", "name": "Ada"}),
    );
    app.auth()
        .login("ada@x.io", "pw", Role::Student)
        .await
        .unwrap();

    assert!(app.guard().require(Role::Trainer).await.is_err());
    assert_eq!(pages.0.lock().unwrap().as_slice(), [Page::Login]);

    backend.fail("student/dashboard", 401);
    assert!(app.student().dashboard().await.unwrap_err().needs_login());
    assert!(app.auth().current_session().await.unwrap().is_none());
    assert_eq!(
        pages.0.lock().unwrap().as_slice(),
        [Page::Login, Page::Login]
    );
}

#[tokio::test]
async fn sqlite_session_survives_rebuild() {
    let url = "sqlite:file:memdb_session_flow?mode=memory&cache=shared";
    let backend = Arc::new(ScriptedBackend::default());
    let pages = Arc::new(Pages::default());
    backend.ok(
        "auth/login",
        json!({"token": "jwt-2", "role": "INTERN", "name": "Grace"}),
    );

    let first = build(&backend, Storage::sqlite(url).await.unwrap(), &pages);
    first
        .auth()
        .login("g@x.io", "pw", Role::Intern)
        .await
        .unwrap();

    let second = build(&backend, Storage::sqlite(url).await.unwrap(), &pages);
    let session = second.auth().current_session().await.unwrap().unwrap();
    assert_eq!(session.role, Role::Intern);
    assert_eq!(session.name, "Grace");
}

#[tokio::test]
async fn intern_upload_gate_and_task_states() {
    let backend = Arc::new(ScriptedBackend::default());
    let pages = Arc::new(Pages::default());
    let app = build(&backend, Storage::in_memory(), &pages);
    backend.ok(
        "auth/login",
        json!({"token": "jwt-3", "role": "INTERN", "name": "Grace"}),
    );
    backend.ok(
        "tasks",
        json!([
            {"id": 1, "title": "Setup", "is_unlocked": true, "status": "Pending", "due_date": "2023-11-01"},
            {"id": 2, "title": "API", "is_unlocked": true, "status": "Rejected"},
            {"id": 3, "title": "Deploy", "is_unlocked": false, "status": "Pending", "due_date": "2024-01-01"}
        ]),
    );
    app.auth().login("g@x.io", "pw", Role::Intern).await.unwrap();

    let err = app
        .submissions()
        .complete_task_bytes(TaskId::new(1), "screenshot.PNG", vec![1, 2, 3])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Upload(_)));
    assert_eq!(backend.hits(), vec!["auth/login"]);

    let today = fixed_now().date_naive();
    let states: Vec<TaskState> = app
        .intern()
        .tasks()
        .await
        .unwrap()
        .iter()
        .map(|task| task.display_state(today))
        .collect();
    assert_eq!(
        states,
        vec![TaskState::SubmitLate, TaskState::Rejected, TaskState::Locked]
    );
}
