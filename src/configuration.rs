use std::env;
use std::str::FromStr;

use secrecy::{ExposeSecret, Secret};

use crate::auth::PasswordHashing;

/// Runtime settings, read from the environment (and `.env` through `dotenv`).
#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// MySQL url (holds the password), books and users are kept in memory when unset
    pub database_url: Option<Secret<String>>,
    pub jwt_secret: Secret<String>,
    pub jwt_expires_in_days: i64,
    pub password_hashing: PasswordHashing,
}

const DEFAULT_JWT_SECRET: &str = "secret";

/// Token lifetimes accepted from `JWT_EXPIRES_IN_DAYS`, ten years at most
const JWT_EXPIRES_IN_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("{name} has an invalid value: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("BCRYPT_COST must be between 4 and 31, got {0}")]
    BcryptCostOutOfRange(u32),
    #[error("JWT_EXPIRES_IN_DAYS must be between 1 and 3650, got {0}")]
    JwtExpiryOutOfRange(i64),
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the settings from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&cost) {
            return Err(ConfigurationError::BcryptCostOutOfRange(cost));
        }

        let jwt_expires_in_days = parse_or(&lookup, "JWT_EXPIRES_IN_DAYS", 7)?;
        if !JWT_EXPIRES_IN_DAYS_RANGE.contains(&jwt_expires_in_days) {
            return Err(ConfigurationError::JwtExpiryOutOfRange(jwt_expires_in_days));
        }

        Ok(Settings {
            host: non_empty("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "APP_PORT", 8080)?,
            database_url: non_empty("DATABASE_URL").map(Secret::new),
            jwt_secret: Secret::new(
                non_empty("JWT_SECRET_KEY").unwrap_or_else(|| DEFAULT_JWT_SECRET.into()),
            ),
            jwt_expires_in_days,
            password_hashing: PasswordHashing { cost },
        })
    }

    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret.expose_secret() == DEFAULT_JWT_SECRET
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigurationError::InvalidValue { name, value }),
        _ => Ok(default),
    }
}
