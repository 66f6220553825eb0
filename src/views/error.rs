use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;

use super::templates;
use crate::auth::{PasswordError, TokenError};
use crate::helper::error_chain_fmt;
use crate::models::BookId;
use crate::repositories::RepositoryError;

/// Failures of the HTML views, rendered as error pages.
#[derive(thiserror::Error)]
pub enum ViewError {
    #[error("Book {0} does not exist")]
    BookNotFound(BookId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error("Blocking task was canceled")]
    Blocking,
}

impl From<BlockingError> for ViewError {
    fn from(_: BlockingError) -> Self {
        ViewError::Blocking
    }
}

impl std::fmt::Debug for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ViewError {
    fn status_code(&self) -> StatusCode {
        match self {
            ViewError::BookNotFound(_) => StatusCode::NOT_FOUND,
            ViewError::Repository(_)
            | ViewError::Password(_)
            | ViewError::Token(_)
            | ViewError::Blocking => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let page = match self {
            ViewError::BookNotFound(_) => templates::error_page("Not Found", &self.to_string()),
            _ => {
                error!("View failed: {:?}", self);
                templates::error_page("Server Error", "Something went wrong, please retry later.")
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(mime::TEXT_HTML_UTF_8)
            .body(page)
    }
}
