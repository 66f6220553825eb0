pub mod password;
pub mod token;

use std::future::{ready, Ready};

use actix_web::cookie::Cookie;
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{http, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::models::UserId;

pub use self::password::{hash_password, verify_password, PasswordError, PasswordHashing};
pub use self::token::{Claims, TokenError, TokenService};

/// Cookie holding the login token of browser sessions.
pub const AUTH_COOKIE: &str = "auth_token";

/// Identity of the caller, inserted into request extensions by `RequireLogin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Authentication required")),
        )
    }
}

/// Raw token of a request: the login cookie first, then a bearer header.
pub fn credentials(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(AUTH_COOKIE) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Who is calling, if anyone. Invalid tokens count as anonymous.
pub fn identify(req: &HttpRequest, tokens: &TokenService) -> Option<AuthenticatedUser> {
    credentials(req).and_then(|token| tokens.decode_token(&token).ok())
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
