use crate::config::AuthorizeConfig;
use crate::services::{DeviceService, PasswordService, TokenService, UserService};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<TokenService>,
    pub password_service: Arc<PasswordService>,
    pub user_service: Arc<UserService>,
    pub device_service: Arc<DeviceService>,
}

impl AppState {
    pub fn build(pool: SqlitePool, authorize: &AuthorizeConfig) -> anyhow::Result<Self> {
        Ok(Self::with_passwords(pool, authorize, PasswordService::new()?))
    }

    pub fn with_passwords(
        pool: SqlitePool,
        authorize: &AuthorizeConfig,
        passwords: PasswordService,
    ) -> Self {
        Self {
            token_service: Arc::new(TokenService::new(authorize)),
            password_service: Arc::new(passwords),
            user_service: Arc::new(UserService::new(pool.clone())),
            device_service: Arc::new(DeviceService::new(pool)),
        }
    }
}
