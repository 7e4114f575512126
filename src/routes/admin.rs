use crate::common::ApiResult;
use crate::extractors::DeviceId;
use crate::models::dtos::device::DeviceResponseDto;
use crate::services::{Identity, access};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

/// Devices of every tenant, each carrying its `ownerId`.
pub async fn list_devices(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    let devices = access::list_all(state.device_service.as_ref(), &identity).await?;
    Ok(Json(
        devices
            .into_iter()
            .map(DeviceResponseDto::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn delete_device(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    DeviceId(id): DeviceId,
) -> ApiResult<impl IntoResponse> {
    access::delete_any(state.device_service.as_ref(), &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
