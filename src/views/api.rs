use actix_web::error::BlockingError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::accounts::authenticate;
use super::ViewError;
use crate::auth::{AuthenticatedUser, TokenError, TokenService};
use crate::helper::error_chain_fmt;
use crate::models::{BookId, NewBook, UserSignin};
use crate::repositories::{BookRepository, RepositoryError, UserRepository};

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Exchanges credentials for a bearer token.
pub async fn create_api_token(
    body: web::Json<UserSignin>,
    users: web::Data<dyn UserRepository>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, ApiError> {
    let UserSignin { username, password } = body.into_inner();

    let user = authenticate(&users, username.clone(), password)
        .await?
        .ok_or_else(|| {
            info!("Invalid API credentials for {}", username);
            ApiError::InvalidCredentials
        })?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token: tokens.create_token(&user)?,
        token_type: "Bearer".to_string(),
    }))
}

pub async fn list_books(books: web::Data<dyn BookRepository>) -> Result<HttpResponse, ApiError> {
    let repository = books.clone();
    let all = web::block(move || repository.find_all()).await??;

    Ok(HttpResponse::Ok().json(all))
}

pub async fn get_book(
    id: web::Path<BookId>,
    books: web::Data<dyn BookRepository>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let repository = books.clone();
    let book = web::block(move || repository.find_by_id(id))
        .await??
        .ok_or(ApiError::BookNotFound(id))?;

    Ok(HttpResponse::Ok().json(book))
}

/// Adds a book to the catalog. Mounted behind `RequireLogin::reject`.
pub async fn create_book(
    user: AuthenticatedUser,
    body: web::Json<NewBook>,
    books: web::Data<dyn BookRepository>,
) -> Result<HttpResponse, ApiError> {
    let book = body.into_inner();
    if book.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".to_string()));
    }

    let repository = books.clone();
    let book = web::block(move || repository.create(book)).await??;
    info!("{} created book {} ({})", user.username, book.id, book);

    Ok(HttpResponse::Created().json(book))
}

/// Fallback for unrouted `/api/` paths, answered in JSON rather than HTML.
pub async fn api_not_found() -> HttpResponse {
    ApiError::RouteNotFound.error_response()
}

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("Book {0} does not exist")]
    BookNotFound(BookId),
    #[error("Not found")]
    RouteNotFound,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid data: {0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("Blocking task was canceled")]
    Blocking,
}

impl From<BlockingError> for ApiError {
    fn from(_: BlockingError) -> Self {
        ApiError::Blocking
    }
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BookNotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Repository(_)
            | ApiError::Token(_)
            | ApiError::View(_)
            | ApiError::Blocking => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("API request failed: {:?}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .json(json!({ "error": message }))
    }
}
