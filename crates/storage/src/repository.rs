use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lms_core::model::{Credentials, Role};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted login session.
///
/// Mirrors `Credentials` plus the moment it was stored, so the session can
/// be reported by `whoami`-style callers without leaking storage concerns
/// into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub token: String,
    pub role: Role,
    pub name: String,
    pub saved_at: DateTime<Utc>,
}

impl CredentialRecord {
    #[must_use]
    pub fn from_credentials(credentials: &Credentials, saved_at: DateTime<Utc>) -> Self {
        Self {
            token: credentials.token.clone(),
            role: credentials.role,
            name: credentials.name.clone(),
            saved_at,
        }
    }

    #[must_use]
    pub fn into_credentials(self) -> Credentials {
        Credentials::new(self.token, self.role, self.name)
    }
}

/// Durable store for the signed-in session (token, role, display name).
///
/// Last write wins; there is at most one stored session.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Fetch the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or the row is corrupt.
    async fn load(&self) -> Result<Option<CredentialRecord>, StorageError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be written.
    async fn save(&self, record: &CredentialRecord) -> Result<(), StorageError>;

    /// Remove the stored session. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Flags that only live for the current run of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionFlag {
    /// The certificate celebration has been shown.
    CelebrationShown,
}

#[async_trait]
pub trait SessionFlagRepository: Send + Sync {
    /// Set `flag`, returning `true` only if it was not already set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the flag set cannot be accessed.
    async fn mark_once(&self, flag: SessionFlag) -> Result<bool, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the flag set cannot be accessed.
    async fn is_set(&self, flag: SessionFlag) -> Result<bool, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    credentials: Arc<Mutex<Option<CredentialRecord>>>,
    flags: Arc<Mutex<HashSet<SessionFlag>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryRepository {
    async fn load(&self) -> Result<Option<CredentialRecord>, StorageError> {
        let guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save(&self, record: &CredentialRecord) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(record.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .credentials
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl SessionFlagRepository for InMemoryRepository {
    async fn mark_once(&self, flag: SessionFlag) -> Result<bool, StorageError> {
        let mut guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.insert(flag))
    }

    async fn is_set(&self, flag: SessionFlag) -> Result<bool, StorageError> {
        let guard = self
            .flags
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.contains(&flag))
    }
}

/// Aggregates the credential store and session flags behind trait objects
/// for easy backend swapping.
///
/// Session flags always stay in memory, whatever backs the credentials.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialRepository>,
    pub flags: Arc<dyn SessionFlagRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let credentials: Arc<dyn CredentialRepository> = Arc::new(repo.clone());
        let flags: Arc<dyn SessionFlagRepository> = Arc::new(repo);
        Self { credentials, flags }
    }
}
