use crate::common::ApiError;
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::convert::Infallible;
use uuid::Uuid;

/// The `{id}` path segment, `None` when it is not a UUID.
///
/// An id that cannot name any device is treated like a missing device.
#[derive(Clone, Copy, Debug)]
pub struct DeviceId(pub Option<Uuid>);

impl DeviceId {
    pub fn require(self) -> Result<Uuid, ApiError> {
        self.0.ok_or(ApiError::NotFound)
    }
}

impl<S> FromRequestParts<S> for DeviceId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = Path::<String>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(raw)| Uuid::parse_str(&raw).ok());
        Ok(Self(id))
    }
}
