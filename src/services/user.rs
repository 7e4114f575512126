use crate::common::{ApiError, ApiResult};
use crate::models::UserEntity;
use crate::services::registry::UserDirectory;
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, password_hash, is_admin, created_at";

pub struct UserService {
    pool: SqlitePool,
}

impl UserService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserDirectory for UserService {
    async fn find_by_username(&self, username: &str) -> ApiResult<Option<UserEntity>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<UserEntity>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        let row = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(
        &self,
        username: &str,
        password_hash: &str,
        is_admin: bool,
    ) -> ApiResult<UserEntity> {
        let sql = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );
        let record = sqlx::query_as::<_, UserEntity>(&sql)
            .bind(Uuid::new_v4())
            .bind(username)
            .bind(password_hash)
            .bind(is_admin)
            .bind(chrono::Utc::now().timestamp())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match err {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    ApiError::Conflict(format!("Username '{username}' is already taken."))
                }
                err => ApiError::from(err),
            })?;
        tracing::info!(user = %record.id, is_admin, "user created");
        Ok(record)
    }
}
