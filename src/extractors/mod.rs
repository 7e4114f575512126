mod device_id;
mod json_body;

pub use device_id::DeviceId;
pub use json_body::JsonBody;
