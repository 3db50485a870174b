use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::config::Config;

pub const TOKEN_TYPE: &str = "bearer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub username: String,
    /// Expiry as a UNIX timestamp (seconds).
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Issues an access token that expires after `ACCESS_TOKEN_EXPIRE_MINUTES`.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    config: &Config,
) -> Result<String, AuthError> {
    let exp = Utc::now() + Duration::minutes(config.access_token_expire_minutes);
    encode_claims(
        &Claims {
            user_id,
            username: username.to_string(),
            exp: exp.timestamp(),
        },
        config,
    )
}

pub fn encode_claims(claims: &Claims, config: &Config) -> Result<String, AuthError> {
    encode(
        &Header::new(config.jwt_algorithm),
        claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| AuthError::Encode(e.to_string()))
}

/// Verifies signature, algorithm and expiry, returning the claims.
pub fn verify_access_token(token: &str, config: &Config) -> Result<Claims, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &Validation::new(config.jwt_algorithm),
    )?;
    Ok(data.claims)
}
