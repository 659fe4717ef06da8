//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, SessionTokens, TokenKind};
pub use password::{
    hash_password, validate_password_strength, validate_username, verify_password,
    MIN_PASSWORD_LENGTH, USERNAME_LENGTH,
};
