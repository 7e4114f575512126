pub mod authenticate;
pub mod request_id;
