//! Plugin store repository: JSON documents keyed by name.

use crate::types::DatabaseResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

/// Repository for the key-value plugin store
#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Read and decode the document stored under `key`
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> DatabaseResult<Option<T>> {
        let row = sqlx::query("SELECT value FROM plugin_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let value: String = row.try_get("value")?;
                Ok(Some(serde_json::from_str(&value)?))
            }
            None => Ok(None),
        }
    }

    /// Insert or replace the document stored under `key`
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> DatabaseResult<()> {
        let encoded = serde_json::to_string(value)?;

        sqlx::query(
            "INSERT INTO plugin_store (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(encoded)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove the document stored under `key`, returning whether it existed
    pub async fn delete(&self, key: &str) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM plugin_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
