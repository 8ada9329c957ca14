use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::users::repo_types::{RepoError, User};

/// Data access for the `users` table.
///
/// Every call is its own unit of work; nothing is wrapped in a transaction.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Drop and recreate the table. All existing rows are lost.
    async fn bootstrap_schema(&self) -> Result<(), RepoError>;
    /// Insert one row and return the rows-affected count.
    async fn create(&self, user: &User) -> Result<u64, RepoError>;
    /// Return the single row with `id`. Zero or several matches are errors.
    async fn get_by_id(&self, id: i64) -> Result<User, RepoError>;
    /// Overwrite email and password of every row with `id`. The id is never written.
    async fn update_by_id(&self, id: i64, email: &str, password: &str) -> Result<u64, RepoError>;
    /// Remove every row with `id`.
    async fn delete_by_id(&self, id: i64) -> Result<u64, RepoError>;
}

pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn bootstrap_schema(&self) -> Result<(), RepoError> {
        sqlx::query("DROP TABLE IF EXISTS users")
            .execute(&self.db)
            .await?;
        sqlx::query(
            r#"
            CREATE TABLE users (
                Id BIGINT,
                Email VARCHAR(30),
                Password VARCHAR(30)
            )
            "#,
        )
        .execute(&self.db)
        .await?;
        debug!("users table recreated");
        Ok(())
    }

    async fn create(&self, user: &User) -> Result<u64, RepoError> {
        let res = sqlx::query(
            r#"
            INSERT INTO users (id, email, password)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepoError> {
        let mut rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_all(&self.db)
        .await?;

        match rows.len() {
            0 => Err(RepoError::NotFound { id }),
            1 => Ok(rows.remove(0)),
            count => Err(RepoError::Ambiguous { id, count }),
        }
    }

    async fn update_by_id(&self, id: i64, email: &str, password: &str) -> Result<u64, RepoError> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET email = $1, password = $2
             WHERE id = $3
            "#,
        )
        .bind(email)
        .bind(password)
        .bind(id)
        .execute(&self.db)
        .await?;
        debug!(user_id = id, affected = res.rows_affected(), "users updated");
        Ok(res.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, RepoError> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        debug!(user_id = id, affected = res.rows_affected(), "users deleted");
        Ok(res.rows_affected())
    }
}
