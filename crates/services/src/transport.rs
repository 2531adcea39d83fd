//! HTTP plumbing between the services and the REST backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// A file attached to a multipart request.
#[derive(Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field: &'static str,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for FilePart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePart")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Empty,
    Json(Value),
    Multipart {
        fields: Vec<(&'static str, String)>,
        file: FilePart,
    },
}

/// One call against `{base}/api/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Body,
}

impl ApiRequest {
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path, Body::Empty)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Post, path, Body::Json(body))
    }

    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::Put, path, Body::Json(body))
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path, Body::Empty)
    }

    #[must_use]
    pub fn upload(
        path: impl Into<String>,
        fields: Vec<(&'static str, String)>,
        file: FilePart,
    ) -> Self {
        Self::new(Method::Post, path, Body::Multipart { fields, file })
    }

    fn new(method: Method, path: impl Into<String>, body: Body) -> Self {
        Self {
            method,
            path: path.into(),
            token: None,
            body,
        }
    }

    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Sends requests and returns the decoded JSON body.
///
/// Implementations map `401` to `ApiError::Unauthorized` and any other
/// non-success status to `ApiError::Rejected`.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` for transport failures, non-success statuses or
    /// bodies that are not JSON.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// `reqwest`-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
}

impl HttpTransport {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.config.api_url(&request.path)?;
        tracing::debug!(method = ?request.method, %url, "api request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(&value),
            Body::Multipart { fields, file } => {
                let mut form = multipart::Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                let part = multipart::Part::bytes(file.bytes).file_name(file.file_name);
                builder.multipart(form.part(file.field, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        classify(status, &bytes)
    }
}

/// Turn a status and raw body into the JSON value or a typed error.
pub(crate) fn classify(status: StatusCode, body: &[u8]) -> Result<Value, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let parsed = if body.iter().all(u8::is_ascii_whitespace) {
        Ok(Value::Null)
    } else {
        serde_json::from_slice::<Value>(body)
    };

    if status.is_success() {
        return Ok(parsed?);
    }

    let message = parsed
        .ok()
        .as_ref()
        .and_then(error_text)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_owned()
        });
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn error_text(body: &Value) -> Option<String> {
    ["error", "message", "msg"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unauthorized_wins_over_body() {
        let err = classify(StatusCode::UNAUTHORIZED, br#"{"error": "expired"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn rejected_surfaces_server_error_text() {
        let err = classify(StatusCode::BAD_REQUEST, br#"{"error": "Limit reached!"}"#).unwrap_err();
        match err {
            ApiError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Limit reached!");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejected_without_json_uses_reason_phrase() {
        let err = classify(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>").unwrap_err();
        assert_eq!(err.server_message(), Some("Internal Server Error"));
    }

    #[test]
    fn empty_success_body_is_null() {
        assert_eq!(classify(StatusCode::OK, b"").unwrap(), Value::Null);
        assert_eq!(
            classify(StatusCode::CREATED, br#"{"message": "ok"}"#).unwrap(),
            json!({"message": "ok"})
        );
    }

    #[test]
    fn bearer_is_attached_to_request() {
        let request = ApiRequest::get("tasks").bearer("tok");
        assert_eq!(request.token.as_deref(), Some("tok"));
        assert_eq!(request.method, Method::Get);
    }
}
