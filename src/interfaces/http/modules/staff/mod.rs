//! Staff module: accounts, login with OTP, password reset

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
