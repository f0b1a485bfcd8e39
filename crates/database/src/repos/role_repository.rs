//! Role repository for database operations.

use crate::entities::RoleRecord;
use crate::types::DatabaseResult;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Repository for role lookups
#[derive(Clone)]
pub struct RoleRepository {
    pool: SqlitePool,
}

impl RoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a role by its type key, e.g. `authenticated`
    pub async fn find_by_type(&self, role_type: &str) -> DatabaseResult<Option<RoleRecord>> {
        let row = sqlx::query("SELECT id, name, description, type FROM roles WHERE type = ?")
            .bind(role_type)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_role_row).transpose()
    }

    pub async fn list(&self) -> DatabaseResult<Vec<RoleRecord>> {
        let rows = sqlx::query("SELECT id, name, description, type FROM roles ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_role_row).collect()
    }
}

fn map_role_row(row: &SqliteRow) -> DatabaseResult<RoleRecord> {
    Ok(RoleRecord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        role_type: row.try_get("type")?,
    })
}
