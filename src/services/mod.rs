pub mod access;
pub mod device;
pub mod password;
pub mod policy;
pub mod registry;
pub mod token;
pub mod user;

#[cfg(test)]
pub mod test_support;

pub use device::DeviceService;
pub use password::PasswordService;
pub use token::{Identity, TokenService};
pub use user::UserService;
