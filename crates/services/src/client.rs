use std::sync::Arc;

use lms_core::model::Role;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ServiceError};
use crate::guard::SessionGuard;
use crate::transport::{ApiRequest, ApiTransport};

/// Transport plus session guard: every authorized call goes through here.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
    guard: Arc<SessionGuard>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn ApiTransport>, guard: Arc<SessionGuard>) -> Self {
        Self { transport, guard }
    }

    #[must_use]
    pub fn guard(&self) -> &Arc<SessionGuard> {
        &self.guard
    }

    /// Unauthenticated call (login, registration, public catalogue).
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Api` on transport or decode failures.
    pub async fn public<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ServiceError> {
        let value = self.transport.send(request).await?;
        decode(value)
    }

    /// Call on behalf of the signed-in `role`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Guard` when no matching session is stored and
    /// `ServiceError::SessionExpired` when the backend answers `401`.
    pub async fn authorized<T: DeserializeOwned>(
        &self,
        role: Role,
        request: ApiRequest,
    ) -> Result<T, ServiceError> {
        let credentials = self.guard.require(role).await?;
        match self.transport.send(request.bearer(credentials.token)).await {
            Ok(value) => decode(value),
            Err(ApiError::Unauthorized) => Err(self.guard.expire().await),
            Err(err) => Err(err.into()),
        }
    }

    /// Authorized call whose response body is not needed.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::authorized`].
    pub async fn authorized_unit(
        &self,
        role: Role,
        request: ApiRequest,
    ) -> Result<(), ServiceError> {
        self.authorized::<Value>(role, request).await.map(|_| ())
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|err| ServiceError::Api(ApiError::Decode(err)))
}

/// Body of the `{ "url": ... }` responses used by certificate endpoints.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct UrlResponse {
    pub url: String,
}

/// Body of the `{ "message": ... }` acknowledgements.
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
