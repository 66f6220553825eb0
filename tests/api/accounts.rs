use actix_web::http::StatusCode;
use actix_web::{test, App};
use bookshop::auth::AUTH_COOKIE;
use bookshop::startup::configure;
use bookshop::views::{LOGIN_URL, LOGOUT_URL, SIGNUP_URL};

use crate::helpers::{auth_cookie, body_text, location, login_request, spawn_app, PASSWORD, USERNAME};

#[actix_rt::test]
async fn valid_credentials_set_the_session_cookie() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, login_request(USERNAME, PASSWORD, None).to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cookie = auth_cookie(&resp);
    assert_eq!(cookie.http_only(), Some(true));
    let user = test_app.state.tokens.decode_token(cookie.value()).unwrap();
    assert_eq!(user.username, USERNAME);
}

#[actix_rt::test]
async fn invalid_credentials_render_the_form_again() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    for (username, password) in [(USERNAME, "wrong"), ("nobody", PASSWORD)] {
        let resp =
            test::call_service(&app, login_request(username, password, None).to_request()).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .response()
            .cookies()
            .all(|cookie| cookie.name() != AUTH_COOKIE));
        assert!(body_text(resp)
            .await
            .contains("Please enter a correct username and password."));
    }
}

#[actix_rt::test]
async fn login_never_redirects_off_site() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = login_request(USERNAME, PASSWORD, Some("https://evil.example.com/")).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
}

#[actix_rt::test]
async fn logout_clears_the_session_cookie() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri(LOGOUT_URL).to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cookie = auth_cookie(&resp);
    assert_eq!(cookie.value(), "");
}

#[actix_rt::test]
async fn signing_up_allows_logging_in() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri(SIGNUP_URL)
        .set_form([
            ("username", "reader"),
            ("email", "reader@example.com"),
            ("password", "pages"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), LOGIN_URL);

    let login = test::call_service(&app, login_request("reader", "pages", None).to_request()).await;
    assert_eq!(login.status(), StatusCode::FOUND);
    assert_eq!(auth_cookie(&login).name(), AUTH_COOKIE);
}

#[actix_rt::test]
async fn signing_up_with_a_taken_username_fails() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri(SIGNUP_URL)
        .set_form([("username", USERNAME), ("email", ""), ("password", "other")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("A user with that username already exists."));
}

#[actix_rt::test]
async fn signing_up_requires_a_password() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri(SIGNUP_URL)
        .set_form([("username", "reader"), ("email", ""), ("password", "")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("Username and password are required."));
    assert!(test_app
        .state
        .users
        .find_by_username("reader")
        .unwrap()
        .is_none());
}

#[actix_rt::test]
async fn signing_up_without_a_password_field_renders_the_form_again() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri(SIGNUP_URL)
        .set_form([("username", "reader"), ("email", "reader@example.com")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp)
        .await
        .contains("Username and password are required."));
}

#[actix_rt::test]
async fn logging_in_without_a_password_field_renders_the_form_again() {
    let test_app = spawn_app();
    let app = test::init_service(App::new().configure(configure(test_app.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri(LOGIN_URL)
        .set_form([("username", USERNAME)])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .response()
        .cookies()
        .all(|cookie| cookie.name() != AUTH_COOKIE));
    assert!(body_text(resp)
        .await
        .contains("Please enter a correct username and password."));
}
