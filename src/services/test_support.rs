use crate::models::UserEntity;
use crate::server::MIGRATOR;
use crate::services::registry::UserDirectory;
use crate::services::user::UserService;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Single-connection in-memory database with migrations applied.
pub async fn memory_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

pub async fn seed_user(pool: &SqlitePool, username: &str, is_admin: bool) -> UserEntity {
    UserService::new(pool.clone())
        .create(username, "$unused", is_admin)
        .await
        .unwrap()
}
