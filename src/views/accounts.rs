use actix_web::{http::header, web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};

use super::{html, templates, ViewError, LIST_URL, LOGIN_URL};
use crate::auth::{
    hash_password, removal_cookie, session_cookie, verify_password, PasswordHashing, TokenService,
};
use crate::models::User;
use crate::repositories::{RepositoryError, UserRepository};

const INVALID_LOGIN: &str = "Please enter a correct username and password.";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Fields default to empty so an incomplete post re-renders the form.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub next: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Only local paths are followed after login, anything else goes to the catalog.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => LIST_URL,
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn login_form(query: web::Query<LoginQuery>) -> HttpResponse {
    html(templates::login_form(safe_next(query.next.as_deref()), None))
}

/// Returns the user when `password` matches, `None` on unknown user or wrong password.
pub(crate) async fn authenticate(
    users: &web::Data<dyn UserRepository>,
    username: String,
    password: String,
) -> Result<Option<User>, ViewError> {
    let repository = users.clone();
    let stored = web::block(move || repository.find_by_username(&username)).await??;

    let user = match stored {
        Some(user) => user,
        None => return Ok(None),
    };

    let password_hash = user.password_hash.clone();
    let matches = web::block(move || verify_password(&password, &password_hash)).await??;

    Ok(if matches { Some(user) } else { None })
}

pub async fn login(
    form: web::Form<LoginForm>,
    users: web::Data<dyn UserRepository>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, ViewError> {
    let LoginForm {
        username,
        password,
        next,
    } = form.into_inner();
    let next = safe_next(next.as_deref()).to_string();

    if username.trim().is_empty() || password.is_empty() {
        return Ok(html(templates::login_form(&next, Some(INVALID_LOGIN))));
    }

    info!("Login attempt for {}", username);

    match authenticate(&users, username.clone(), password).await? {
        Some(user) => {
            let token = tokens.create_token(&user)?;
            info!("{} logged in", user);

            Ok(HttpResponse::Found()
                .insert_header((header::LOCATION, next))
                .cookie(session_cookie(token))
                .finish())
        }
        None => {
            info!("Invalid credentials for {}", username);
            Ok(html(templates::login_form(&next, Some(INVALID_LOGIN))))
        }
    }
}

pub async fn logout() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, LIST_URL))
        .cookie(removal_cookie())
        .finish()
}

pub async fn signup_form() -> HttpResponse {
    html(templates::signup_form(None))
}

/// Creates an account then sends the user to the login page.
pub async fn signup(
    form: web::Form<SignupForm>,
    users: web::Data<dyn UserRepository>,
    hashing: web::Data<PasswordHashing>,
) -> Result<HttpResponse, ViewError> {
    let SignupForm {
        username,
        email,
        password,
    } = form.into_inner();
    let username = username.trim().to_string();

    if username.is_empty() || password.is_empty() {
        return Ok(html(templates::signup_form(Some(
            "Username and password are required.",
        ))));
    }

    let cost = hashing.cost;
    let password_hash = web::block(move || hash_password(&password, cost)).await??;

    let repository = users.clone();
    let created = web::block(move || repository.create(&username, &email, &password_hash)).await?;

    match created {
        Ok(user) => {
            info!("Registered user {}", user);
            Ok(redirect(LOGIN_URL))
        }
        Err(RepositoryError::Conflict(_)) => Ok(html(templates::signup_form(Some(
            "A user with that username already exists.",
        )))),
        Err(error) => Err(error.into()),
    }
}
