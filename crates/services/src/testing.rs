//! Scripted transport and wiring helpers for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lms_core::model::{Credentials, Role};
use lms_core::time::fixed_clock;
use serde_json::Value;
use storage::repository::InMemoryRepository;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::guard::SessionGuard;
use crate::guard::tests::RecordingNavigator;
use crate::transport::{ApiRequest, ApiTransport, Method};

#[derive(Clone)]
pub(crate) enum Reply {
    Json(Value),
    Unauthorized,
    Rejected(u16, &'static str),
}

#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .insert((method, path.to_owned()), reply);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Unauthorized) => Err(ApiError::Unauthorized),
            Some(Reply::Rejected(status, message)) => Err(ApiError::Rejected {
                status,
                message: message.to_owned(),
            }),
            None => Err(ApiError::Rejected {
                status: 404,
                message: format!("no scripted reply for {key:?}"),
            }),
        }
    }
}

pub(crate) struct Harness {
    pub transport: Arc<FakeTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub repo: InMemoryRepository,
    pub client: Arc<ApiClient>,
}

impl Harness {
    pub(crate) fn new() -> Self {
        let transport = Arc::new(FakeTransport::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let repo = InMemoryRepository::new();
        let guard = Arc::new(SessionGuard::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            navigator.clone(),
        ));
        let client = Arc::new(ApiClient::new(transport.clone(), guard));
        Self {
            transport,
            navigator,
            repo,
            client,
        }
    }

    pub(crate) async fn signed_in(role: Role) -> Self {
        let harness = Self::new();
        harness
            .client
            .guard()
            .establish(&Credentials::new("token-1", role, "Ada"))
            .await
            .unwrap();
        harness
    }
}
