//! Credential primitives: one-way password hashing and signed, time-limited
//! bearer tokens. No revocation exists; a compromised token stays valid for
//! the remainder of its lifetime.

mod password;
mod token;

pub use password::{hash_password, verify_password, PasswordError};
pub use token::{issue_token, verify_token, AuthConfig, Claims, TokenError, DEFAULT_TOKEN_TTL_MINUTES};
