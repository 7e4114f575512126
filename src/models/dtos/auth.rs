use crate::common::ApiError;
use crate::models::UserEntity;
use crate::services::token::{Identity, IssuedToken};
use crate::utils::serialize_timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const USERNAME_MAX_LEN: usize = 32;
const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LoginBodyDto {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterBodyDto {
    pub username: String,
    pub password: String,
}

impl RegisterBodyDto {
    pub fn validate(&self) -> Result<(), ApiError> {
        let username = self.username.trim();
        if username.is_empty() || username.len() > USERNAME_MAX_LEN {
            return Err(ApiError::Validation(format!(
                "Username must be between 1 and {USERNAME_MAX_LEN} characters."
            )));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(ApiError::Validation(
                "Username may only contain letters, digits, '_', '-' and '.'.".to_string(),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {PASSWORD_MIN_LEN} characters."
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseDto {
    pub token: String,
    pub token_type: &'static str,
    #[serde(serialize_with = "serialize_timestamp")]
    pub issued_at: i64,
    #[serde(serialize_with = "serialize_timestamp")]
    pub expires_at: i64,
    pub user: UserResponseDto,
}

impl TokenResponseDto {
    pub fn new(issued: IssuedToken, user: UserEntity) -> Self {
        Self {
            token: issued.token,
            token_type: "Bearer",
            issued_at: issued.issued_at,
            expires_at: issued.expires_at,
            user: UserResponseDto::from(user),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: String,
    pub is_admin: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: i64,
}

impl From<UserEntity> for UserResponseDto {
    fn from(value: UserEntity) -> Self {
        Self {
            id: value.id,
            username: value.username,
            is_admin: value.is_admin,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponseDto {
    pub subject_id: Uuid,
    pub username: String,
    /// Admin flag carried by the credential, which may lag behind the store.
    pub is_admin: bool,
}

impl IdentityResponseDto {
    pub fn new(identity: Identity, user: UserEntity) -> Self {
        Self {
            subject_id: identity.subject_id,
            username: user.username,
            is_admin: identity.is_admin,
        }
    }
}
