use crate::common::ApiResult;
use crate::extractors::{DeviceId, JsonBody};
use crate::models::NewDevice;
use crate::models::dtos::device::{CreateDeviceBodyDto, DeviceResponseDto};
use crate::services::{Identity, access};
use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};

pub async fn list(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<impl IntoResponse> {
    let devices = access::list_own(state.device_service.as_ref(), &identity).await?;
    Ok(Json(
        devices
            .into_iter()
            .map(DeviceResponseDto::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    JsonBody(body): JsonBody<CreateDeviceBodyDto>,
) -> ApiResult<impl IntoResponse> {
    let attrs = NewDevice::try_from(body)?;
    let device = access::create_own(state.device_service.as_ref(), &identity, attrs).await?;
    Ok((StatusCode::CREATED, Json(DeviceResponseDto::from(device))))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    device_id: DeviceId,
) -> ApiResult<impl IntoResponse> {
    let id = device_id.require()?;
    let device = access::get_own(state.device_service.as_ref(), &identity, id).await?;
    Ok(Json(DeviceResponseDto::from(device)))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    device_id: DeviceId,
) -> ApiResult<impl IntoResponse> {
    let id = device_id.require()?;
    access::delete_own(state.device_service.as_ref(), &identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
