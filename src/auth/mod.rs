pub mod auth_dto;
pub mod auth_handlers;
pub mod auth_service;
pub mod google;
pub mod jwt;
pub mod password;

pub use jwt::{create_access_token, create_refresh_token, verify_token, Claims};
pub use password::{hash_password, verify_password};

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";
