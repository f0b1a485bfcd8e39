//! User repository for database operations.

use crate::entities::{NewUser, UserRecord};
use crate::types::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, email, password, provider, role, confirmed, blocked, confirmation_token, profile, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<UserRecord>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    /// Find user by email. The column collates case-insensitively.
    pub async fn find_by_email(&self, email: &str) -> DatabaseResult<Option<UserRecord>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    /// Find the user holding a pending confirmation token
    pub async fn find_by_confirmation_token(
        &self,
        token: &str,
    ) -> DatabaseResult<Option<UserRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE confirmation_token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user_row).transpose()
    }

    /// Create new user
    pub async fn create(&self, user: &NewUser) -> DatabaseResult<UserRecord> {
        let now = Utc::now().to_rfc3339();
        let profile = serde_json::to_string(&user.profile)?;

        let result = sqlx::query(
            "INSERT INTO users (email, password, provider, role, confirmed, blocked, profile, created_at, updated_at) VALUES (?, ?, ?, ?, ?, 0, ?, ?, ?)",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.provider)
        .bind(user.role)
        .bind(user.confirmed)
        .bind(profile)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let user_id = result.last_insert_rowid();

        self.find_by_id(user_id).await?.ok_or_else(|| {
            DatabaseError::NotFound(format!("created user {user_id} could not be read back"))
        })
    }

    /// Replace the pending confirmation token
    pub async fn set_confirmation_token(
        &self,
        id: i64,
        token: Option<&str>,
    ) -> DatabaseResult<()> {
        let result = sqlx::query(
            "UPDATE users SET confirmation_token = ?, updated_at = ? WHERE id = ?",
        )
        .bind(token)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {id}")));
        }

        Ok(())
    }

    /// Mark the user confirmed and drop the confirmation token
    pub async fn mark_confirmed(&self, id: i64) -> DatabaseResult<UserRecord> {
        let result = sqlx::query(
            "UPDATE users SET confirmed = 1, confirmation_token = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("user {id}")));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {id}")))
    }

    /// List users ordered by creation
    pub async fn list(&self, limit: u32) -> DatabaseResult<Vec<UserRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id ASC LIMIT ?"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user_row).collect()
    }

    /// Count all users
    pub async fn count(&self) -> DatabaseResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn map_user_row(row: &SqliteRow) -> DatabaseResult<UserRecord> {
    let profile: String = row.try_get("profile")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(UserRecord {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        provider: row.try_get("provider")?,
        role: row.try_get("role")?,
        confirmed: row.try_get("confirmed")?,
        blocked: row.try_get("blocked")?,
        confirmation_token: row.try_get("confirmation_token")?,
        profile: serde_json::from_str(&profile)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_timestamp(value: &str) -> DatabaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Serialization(format!("invalid timestamp {value}: {e}")))
}
