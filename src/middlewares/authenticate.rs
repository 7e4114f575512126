use crate::common::ApiError;
use crate::services::token::{Identity, TokenService};
use crate::state::AppState;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

/// Returns the credential of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Every failure collapses into `Unauthenticated`; the reason is only logged.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenService) -> Result<Identity, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthenticated)?;
    tokens.verify(token).map_err(|err| {
        tracing::debug!(reason = %err, "credential rejected");
        ApiError::Unauthenticated
    })
}

/// Attaches the caller's [`Identity`] to the request, or answers 401.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = authenticate(request.headers(), &state.token_service)?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthorizeConfig;
    use crate::models::UserEntity;
    use axum::http::HeaderValue;
    use uuid::Uuid;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer   abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_authenticate() {
        let tokens = TokenService::new(&AuthorizeConfig {
            secret: "secret".to_string(),
            token_ttl: 60,
            issuer: "devicegate".to_string(),
        });
        let user = UserEntity {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: String::new(),
            is_admin: false,
            created_at: 0,
        };
        let issued = tokens.issue(&user).unwrap();
        let identity =
            authenticate(&headers(&format!("Bearer {}", issued.token)), &tokens).unwrap();
        assert_eq!(identity.subject_id, user.id);

        assert!(matches!(
            authenticate(&HeaderMap::new(), &tokens),
            Err(ApiError::Unauthenticated)
        ));
        assert!(matches!(
            authenticate(&headers("Bearer garbage"), &tokens),
            Err(ApiError::Unauthenticated)
        ));
        let expired = tokens.issue_at(&user, 0).unwrap();
        assert!(matches!(
            authenticate(&headers(&format!("Bearer {}", expired.token)), &tokens),
            Err(ApiError::Unauthenticated)
        ));
    }
}
