use serde::{Deserialize, Serialize};
use sqlx::{
    postgres::{PgDatabaseError, PgRow},
    FromRow, Row,
};
use thiserror::Error;

/// SQLSTATE raised by PostgreSQL when a value overflows a VARCHAR column.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// User record in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String, // plain text, as stored
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
        })
    }
}

/// Failures surfaced by a [`UserRepository`](super::repo::UserRepository).
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user {id} not found")]
    NotFound { id: i64 },

    #[error("{count} users share id {id}")]
    Ambiguous { id: i64, count: usize },

    #[error("{field} exceeds 30 characters")]
    ValueTooLong { field: &'static str },

    #[error("storage error: {0}")]
    Storage(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db)
                if db.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) =>
            {
                let column = db
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(PgDatabaseError::column);
                RepoError::ValueTooLong {
                    field: overflowed_field(column),
                }
            }
            _ => RepoError::Storage(e),
        }
    }
}

// PostgreSQL rarely names the column for 22001.
fn overflowed_field(column: Option<&str>) -> &'static str {
    match column {
        Some("email") => "email",
        Some("password") => "password",
        _ => "email/password",
    }
}
