//! Credentials repository for database operations

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Sqlite};

use crate::{
    error::{AppError, AppResult},
    models::{Credential, Role},
};

use super::CredentialStore;

/// Internal row structure; the role column is plain text in SQLite.
#[derive(Debug, FromRow)]
struct CredentialRow {
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = AppError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|e: String| AppError::Internal(e))?;

        Ok(Credential {
            username: row.username,
            password_hash: row.password_hash,
            role,
        })
    }
}

#[derive(Clone)]
pub struct CredentialsRepository {
    pool: Pool<Sqlite>,
}

impl CredentialsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for CredentialsRepository {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT username, password_hash, role FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Credential::try_from).transpose()
    }

    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, credential: &Credential) -> AppResult<()> {
        sqlx::query("INSERT INTO users (username, password_hash, role) VALUES (?, ?, ?)")
            .bind(&credential.username)
            .bind(&credential.password_hash)
            .bind(credential.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::conflict_on_unique(e, "Username already exists"))?;

        Ok(())
    }
}
