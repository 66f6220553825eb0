use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;
use bookshop::auth::{hash_password, PasswordHashing, TokenService, AUTH_COOKIE};
use bookshop::models::{Availability, Book, NewBook, User};
use bookshop::startup::AppState;
use bookshop::views::LOGIN_URL;
use secrecy::Secret;

pub const USERNAME: &str = "khalil";
pub const EMAIL: &str = "khalilmarmat08@gmail.com";
pub const PASSWORD: &str = "secret";

pub const TITLE: &str = "django for beginners";
pub const AUTHOR: &str = "WS Vinvcent";
pub const PRICE: &str = "30";
pub const IMAGE_URL: &str = "https://forexample.jpg";
pub const FOLLOW_AUTHOR: &str = "https://twitter.com/?lang=en";

/// Lowest bcrypt cost, keeps logins fast
const TEST_BCRYPT_COST: u32 = 4;

pub struct TestApp {
    pub state: AppState,
    /// The in-stock book, id 1
    pub book: Book,
    pub user: User,
}

impl TestApp {
    /// Adds a book straight into the store.
    pub fn create_book(&self, book: NewBook) -> Book {
        self.state.books.create(book).expect("Failed to create book")
    }

    pub fn access_token(&self) -> String {
        self.state
            .tokens
            .create_token(&self.user)
            .expect("Failed to create token")
    }
}

pub fn book_data() -> NewBook {
    NewBook {
        title: TITLE.to_string(),
        author: AUTHOR.to_string(),
        description: "anything".to_string(),
        price: PRICE.to_string(),
        image_url: IMAGE_URL.to_string(),
        follow_author: FOLLOW_AUTHOR.to_string(),
        book_available: Availability::InStock,
    }
}

/// State seeded with one user and one available book.
///
/// Each test gets its own in-memory store, so ids always start at 1.
pub fn spawn_app() -> TestApp {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = pretty_env_logger::try_init();
    }

    let state = AppState::in_memory(
        TokenService::new(Secret::new("test-secret".to_string()), 1),
        PasswordHashing {
            cost: TEST_BCRYPT_COST,
        },
    );

    let password_hash =
        hash_password(PASSWORD, TEST_BCRYPT_COST).expect("Failed to hash password");
    let user = state
        .users
        .create(USERNAME, EMAIL, &password_hash)
        .expect("Failed to create user");
    let book = state
        .books
        .create(book_data())
        .expect("Failed to create book");

    TestApp { state, book, user }
}

pub fn login_request(username: &str, password: &str, next: Option<&str>) -> test::TestRequest {
    let mut form = vec![("username", username), ("password", password)];
    if let Some(next) = next {
        form.push(("next", next));
    }

    test::TestRequest::post().uri(LOGIN_URL).set_form(form)
}

/// Session cookie set by a successful login response.
pub fn auth_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == AUTH_COOKIE)
        .map(|cookie| cookie.into_owned())
        .expect("No session cookie in response")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .expect("No Location header")
        .to_str()
        .expect("Location header is not ascii")
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).expect("Response body is not utf-8")
}
