use actix_web::{web, HttpRequest, HttpResponse};
use log::info;

use super::{html, templates, ViewError};
use crate::auth::{identify, AuthenticatedUser, TokenService};
use crate::models::{Book, BookId};
use crate::repositories::BookRepository;

async fn fetch_book(books: &web::Data<dyn BookRepository>, id: BookId) -> Result<Book, ViewError> {
    let repository = books.clone();
    web::block(move || repository.find_by_id(id))
        .await??
        .ok_or(ViewError::BookNotFound(id))
}

/// Every book with its price, open to anyone.
pub async fn list(
    req: HttpRequest,
    books: web::Data<dyn BookRepository>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, ViewError> {
    let repository = books.clone();
    let all = web::block(move || repository.find_all()).await??;
    let user = identify(&req, &tokens);

    Ok(html(templates::book_list(&all, user.as_ref())))
}

/// One book, with a checkout link when it is in stock.
pub async fn detail(
    req: HttpRequest,
    id: web::Path<BookId>,
    books: web::Data<dyn BookRepository>,
    tokens: web::Data<TokenService>,
) -> Result<HttpResponse, ViewError> {
    let book = fetch_book(&books, id.into_inner()).await?;
    let user = identify(&req, &tokens);

    Ok(html(templates::book_detail(&book, user.as_ref())))
}

/// Order summary. Mounted behind `RequireLogin`, so the caller is known.
pub async fn checkout(
    user: AuthenticatedUser,
    id: web::Path<BookId>,
    books: web::Data<dyn BookRepository>,
) -> Result<HttpResponse, ViewError> {
    let book = fetch_book(&books, id.into_inner()).await?;
    info!("{} is checking out book {}", user.username, book.id);

    Ok(html(templates::checkout(&book, &user)))
}
