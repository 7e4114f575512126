use crate::common::{ApiError, ApiResult};
use crate::extractors::JsonBody;
use crate::models::dtos::auth::{
    IdentityResponseDto, LoginBodyDto, RegisterBodyDto, TokenResponseDto, UserResponseDto,
};
use crate::services::Identity;
use crate::services::registry::UserDirectory;
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

/// Exchanges username and password for a session token.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginBodyDto>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_username(body.username.trim())
        .await?;
    let passwords = state.password_service.clone();
    let hash = user.as_ref().map(|it| it.password_hash.clone());
    let matched = tokio::task::spawn_blocking(move || {
        passwords.verify_account(hash.as_deref(), &body.password)
    })
    .await??;
    let user = match user {
        Some(user) if matched => user,
        Some(user) => {
            tracing::debug!(user = %user.id, "login rejected: wrong password");
            return Err(ApiError::InvalidCredentials);
        }
        None => {
            tracing::debug!("login rejected: unknown username");
            return Err(ApiError::InvalidCredentials);
        }
    };
    let issued = state.token_service.issue(&user)?;
    tracing::info!(user = %user.id, is_admin = user.is_admin, "user logged in");
    Ok(Json(TokenResponseDto::new(issued, user)))
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterBodyDto>,
) -> ApiResult<impl IntoResponse> {
    body.validate()?;
    let passwords = state.password_service.clone();
    let password = body.password;
    let hash = tokio::task::spawn_blocking(move || passwords.hash(&password)).await??;
    let user = state
        .user_service
        .create(body.username.trim(), &hash, false)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponseDto::from(user))))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    // a valid credential may outlive its account
    let user = state
        .user_service
        .find_by_id(identity.subject_id)
        .await?
        .ok_or(ApiError::Unauthenticated)?;
    Ok(Json(IdentityResponseDto::new(identity, user)))
}
