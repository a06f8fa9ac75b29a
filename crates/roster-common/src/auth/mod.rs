//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TOKEN_TYPE};
pub use password::{validate_password_strength, PasswordService};
