use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::AuthenticatedUser;
use crate::helper::error_chain_fmt;
use crate::models::User;

/// Issues and checks the signed tokens carried by the login cookie
/// and by `Authorization: Bearer` headers.
#[derive(Clone)]
pub struct TokenService {
    secret: Secret<String>,
    expire_in_days: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Username, so pages can greet the user without a lookup
    pub name: String,
    /// Issued At
    pub iat: usize,
    /// Expires At
    pub exp: usize,
}

impl TokenService {
    pub fn new(secret: Secret<String>, expire_in_days: i64) -> Self {
        Self {
            secret,
            expire_in_days,
        }
    }

    pub fn create_token(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = Duration::try_days(self.expire_in_days)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or(TokenError::InvalidLifetime(self.expire_in_days))?;
        let claims = Claims {
            sub: user.id.to_string(),
            name: user.username.clone(),
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes()),
        )
        .map_err(TokenError::Encoding)
    }

    /// Checks signature and expiry, then returns who the token belongs to.
    pub fn decode_token(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(TokenError::Decoding)?;

        let id = data
            .claims
            .sub
            .parse()
            .map_err(|_| TokenError::InvalidSubject(data.claims.sub.clone()))?;

        Ok(AuthenticatedUser {
            id,
            username: data.claims.name,
        })
    }
}

#[derive(thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    Decoding(jsonwebtoken::errors::Error),
    #[error("Error while encoding token: {0}")]
    Encoding(jsonwebtoken::errors::Error),
    #[error("Token subject is not a user id: {0:?}")]
    InvalidSubject(String),
    #[error("Token lifetime of {0} days is out of range")]
    InvalidLifetime(i64),
}

impl std::fmt::Debug for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
