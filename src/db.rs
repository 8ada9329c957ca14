use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

/// Open the shared PostgreSQL pool used by every repository call.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    info!("connecting to database");
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("connect to database")?;
    info!("database pool ready");
    Ok(db)
}
