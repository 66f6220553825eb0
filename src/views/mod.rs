pub mod accounts;
pub mod api;
pub mod catalog;
pub mod error;
pub mod templates;

use actix_web::HttpResponse;

use crate::models::BookId;

pub use accounts::*;
pub use api::*;
pub use catalog::*;
pub use error::ViewError;

pub const LIST_URL: &str = "/";
pub const LOGIN_URL: &str = "/accounts/login/";
pub const LOGOUT_URL: &str = "/accounts/logout/";
pub const SIGNUP_URL: &str = "/accounts/signup/";

pub fn detail_path(id: BookId) -> String {
    format!("/{}/", id)
}

pub fn checkout_path(id: BookId) -> String {
    format!("/{}/checkout/", id)
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(body)
}

/// Fallback for every unrouted path.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(templates::error_page(
            "Not Found",
            "The requested page does not exist.",
        ))
}
