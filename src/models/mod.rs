pub mod device;
pub mod dtos;
pub mod user;

pub use device::{DeviceEntity, DeviceStatus, NewDevice};
pub use user::UserEntity;
