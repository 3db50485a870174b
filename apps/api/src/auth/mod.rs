//! Accounts and bearer-token authentication.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

use thiserror::Error;

pub use extractor::AuthUser;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token encoding failed: {0}")]
    Encode(String),
}
