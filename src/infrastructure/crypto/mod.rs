//! Password hashing, JWT and random token helpers

pub mod jwt;
pub mod password;
pub mod tokens;

pub use jwt::{create_token, verify_token, JwtConfig, TokenClaims};
pub use password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
pub use tokens::{reservation_code, sha256_hex, six_digit_code};
