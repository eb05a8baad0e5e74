//! Authentication module
//!
//! JWT bearer tokens carrying the caller's role, argon2 password hashing
//! with read support for legacy bcrypt hashes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{AdminUser, AuthUser};
pub use password::PasswordService;
