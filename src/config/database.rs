use anyhow::Context;
use sqlx::PgPool;
use std::env;

/// Connects to PostgreSQL using `DATABASE_URL` and applies pending
/// migrations. Called once at startup; the pool is cheaply cloneable.
pub async fn init_db_pool() -> anyhow::Result<PgPool> {
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    Ok(pool)
}
