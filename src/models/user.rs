use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: i64,
}
