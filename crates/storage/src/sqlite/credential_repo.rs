use async_trait::async_trait;

use crate::repository::{CredentialRecord, CredentialRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{map_credential_row, role_to_str};

#[async_trait]
impl CredentialRepository for SqliteRepository {
    async fn load(&self) -> Result<Option<CredentialRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT token, role, name, saved_at
            FROM credentials
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        row.as_ref().map(map_credential_row).transpose()
    }

    async fn save(&self, record: &CredentialRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO credentials (id, token, role, name, saved_at)
            VALUES (1, ?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                role = excluded.role,
                name = excluded.name,
                saved_at = excluded.saved_at
            ",
        )
        .bind(&record.token)
        .bind(role_to_str(record.role))
        .bind(&record.name)
        .bind(record.saved_at)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM credentials")
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
