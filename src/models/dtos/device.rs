use crate::common::ApiError;
use crate::models::{DeviceEntity, DeviceStatus, NewDevice};
use crate::utils::serialize_timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const NAME_MAX_LEN: usize = 64;

/// Fields outside this struct (an `ownerId`, for instance) are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateDeviceBodyDto {
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub status: DeviceStatus,
}

impl TryFrom<CreateDeviceBodyDto> for NewDevice {
    type Error = ApiError;
    fn try_from(value: CreateDeviceBodyDto) -> Result<Self, Self::Error> {
        let name = value.name.trim();
        if name.is_empty() || name.chars().count() > NAME_MAX_LEN {
            return Err(ApiError::Validation(format!(
                "Device name must be between 1 and {NAME_MAX_LEN} characters."
            )));
        }
        let device_type = value.device_type.trim();
        if device_type.is_empty() {
            return Err(ApiError::Validation(
                "Device type must not be empty.".to_string(),
            ));
        }
        Ok(NewDevice {
            name: name.to_string(),
            device_type: device_type.to_string(),
            status: value.status,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceResponseDto {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: DeviceStatus,
    pub owner_id: Uuid,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: i64,
}

impl From<DeviceEntity> for DeviceResponseDto {
    fn from(value: DeviceEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            device_type: value.device_type,
            status: value.status,
            owner_id: value.owner_id,
            created_at: value.created_at,
        }
    }
}
