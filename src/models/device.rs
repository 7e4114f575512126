use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DeviceEntity {
    pub id: Uuid,
    pub name: String,
    pub device_type: String,
    pub status: DeviceStatus,
    pub owner_id: Uuid,
    pub created_at: i64,
}

/// Attributes a caller may choose when creating a device. The owner is never one of them.
#[derive(Debug, Clone)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
    pub status: DeviceStatus,
}
