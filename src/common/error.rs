use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed or expired credential.
    Unauthenticated,
    /// Login with an unknown username or a wrong password.
    InvalidCredentials,
    /// Authenticated, but the access policy denied the action.
    Unauthorized,
    /// Absent resource, or present but owned by another tenant on owner-scoped paths.
    NotFound,
    Validation(String),
    Conflict(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound => "not_found",
            ApiError::Validation(_) => "validation_error",
            ApiError::Conflict(_) => "conflict",
            ApiError::Internal(_) => "internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Unauthenticated => f.write_str("Authentication required."),
            ApiError::InvalidCredentials => f.write_str("Invalid username or password."),
            ApiError::Unauthorized => f.write_str("Access forbidden: insufficient permissions."),
            ApiError::NotFound => f.write_str("The requested resource could not be found."),
            ApiError::Validation(reason) => write!(f, "{reason}"),
            ApiError::Conflict(reason) => write!(f, "{reason}"),
            ApiError::Internal(_) => {
                write!(f, "An internal error occurred. Please try again later.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(err) => {
                tracing::error!("{:?}", err);
                err.chain()
                    .skip(1)
                    .for_each(|cause| tracing::error!("Because: {}", cause));
            }
            _ => tracing::debug!(status = %status, "{}", self),
        }
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(value: E) -> Self {
        Self::Internal(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("taken".to_string()).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_internal_hides_cause() {
        let err = ApiError::from(anyhow::anyhow!("database is locked"));
        assert_eq!(err.kind(), "internal");
        assert!(!err.to_string().contains("locked"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
