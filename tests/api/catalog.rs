use actix_web::http::StatusCode;
use actix_web::{test, App};
use bookshop::models::{Availability, NewBook};
use bookshop::startup::configure;

use crate::helpers::{
    auth_cookie, body_text, book_data, login_request, spawn_app, AUTHOR, PASSWORD, PRICE, TITLE,
    USERNAME,
};

#[actix_rt::test]
async fn book_list_view_for_logged_in_user() {
    // Arranges
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;
    let login = test::call_service(&app, login_request(USERNAME, PASSWORD, None).to_request()).await;
    let cookie = auth_cookie(&login);

    // Acts
    let req = test::TestRequest::get().uri("/").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    // Asserts
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(TITLE));
    assert!(body.contains(PRICE));
    assert!(body.contains("Logged in as khalil"));
}

#[actix_rt::test]
async fn book_list_view_for_anonymous_user() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(TITLE));
    assert!(body.contains(PRICE));
}

#[actix_rt::test]
async fn book_list_view_shows_every_book() {
    let test_app = spawn_app();
    test_app.create_book(NewBook {
        title: "new book".to_string(),
        price: "12.50".to_string(),
        ..book_data()
    });
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    let body = body_text(resp).await;
    assert!(body.contains(TITLE));
    assert!(body.contains("new book"));
    assert!(body.contains("12.50"));
}

#[actix_rt::test]
async fn book_detail_view_for_logged_in_user() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;
    let login = test::call_service(&app, login_request(USERNAME, PASSWORD, None).to_request()).await;
    let cookie = auth_cookie(&login);

    let req = test::TestRequest::get()
        .uri(&format!("/{}/", test_app.book.id))
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(TITLE));
    assert!(body.contains(AUTHOR));
    assert!(body.contains(PRICE));
}

#[actix_rt::test]
async fn book_detail_view_for_anonymous_user() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/1/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains(TITLE));
    assert!(body.contains(AUTHOR));
    assert!(body.contains(PRICE));
}

#[actix_rt::test]
async fn book_when_available() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/1/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Buy Now"));
    assert!(!body.contains("Out of Stock !"));
}

#[actix_rt::test]
async fn book_when_out_of_stock() {
    // Arranges: a second book which is out of stock
    let test_app = spawn_app();
    let second = test_app.create_book(NewBook {
        title: "new book".to_string(),
        author: "khalil".to_string(),
        book_available: Availability::OutOfStock,
        ..book_data()
    });
    assert_eq!(second.id, 2);
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    // Acts
    let resp = test::call_service(&app, test::TestRequest::get().uri("/2/").to_request()).await;

    // Asserts: the buy now option is no longer present
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Out of Stock !"));
    assert!(!body.contains("Buy Now"));
}

#[actix_rt::test]
async fn unknown_books_are_not_found() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    for uri in ["/42/", "/not-a-number/", "/42/checkout/extra"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}
