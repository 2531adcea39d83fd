use lms_core::model::Role;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{CredentialRecord, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn role_to_str(role: Role) -> &'static str {
    role.as_str()
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, StorageError> {
    raw.parse::<Role>().map_err(ser)
}

pub(crate) fn map_credential_row(row: &SqliteRow) -> Result<CredentialRecord, StorageError> {
    let role: String = row.try_get("role").map_err(ser)?;
    Ok(CredentialRecord {
        token: row.try_get("token").map_err(ser)?,
        role: parse_role(&role)?,
        name: row.try_get("name").map_err(ser)?,
        saved_at: row.try_get("saved_at").map_err(ser)?,
    })
}
