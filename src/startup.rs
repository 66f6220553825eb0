use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{guard, middleware, web, App, HttpServer};
use log::{info, warn};
use secrecy::ExposeSecret;

use crate::auth::{PasswordHashing, TokenService};
use crate::configuration::Settings;
use crate::middlewares::RequireLogin;
use crate::repositories::{
    establish_connection, BookRepository, InMemoryBookRepository, InMemoryUserRepository,
    MysqlBookRepository, MysqlUserRepository, RepositoryError, UserRepository,
};
use crate::views::{self, LOGIN_URL, LOGOUT_URL, SIGNUP_URL};

/// Everything the routes share.
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: TokenService,
    pub password_hashing: PasswordHashing,
}

impl AppState {
    /// MySQL when `DATABASE_URL` is set, process memory otherwise.
    pub fn from_settings(settings: &Settings) -> Result<Self, RepositoryError> {
        let (books, users): (Arc<dyn BookRepository>, Arc<dyn UserRepository>) =
            match &settings.database_url {
                Some(database_url) => {
                    let pool = establish_connection(database_url.expose_secret())?;
                    info!("Storing books and users in MySQL");
                    (
                        Arc::new(MysqlBookRepository::new(pool.clone())),
                        Arc::new(MysqlUserRepository::new(pool)),
                    )
                }
                None => {
                    warn!("DATABASE_URL is not set, books and users are kept in memory");
                    (
                        Arc::new(InMemoryBookRepository::new()),
                        Arc::new(InMemoryUserRepository::new()),
                    )
                }
            };

        Ok(Self {
            books,
            users,
            tokens: TokenService::new(settings.jwt_secret.clone(), settings.jwt_expires_in_days),
            password_hashing: settings.password_hashing,
        })
    }

    pub fn in_memory(tokens: TokenService, password_hashing: PasswordHashing) -> Self {
        Self {
            books: Arc::new(InMemoryBookRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            tokens,
            password_hashing,
        }
    }
}

/// Registers shared state and every route.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let tokens = web::Data::new(state.tokens);

        cfg.app_data(web::Data::from(state.books))
            .app_data(web::Data::from(state.users))
            .app_data(tokens.clone())
            .app_data(web::Data::new(state.password_hashing))
            .service(
                web::resource(LOGIN_URL)
                    .name("login")
                    .route(web::get().to(views::login_form))
                    .route(web::post().to(views::login)),
            )
            .service(
                web::resource(LOGOUT_URL)
                    .name("logout")
                    .route(web::get().to(views::logout))
                    .route(web::post().to(views::logout)),
            )
            .service(
                web::resource(SIGNUP_URL)
                    .name("signup")
                    .route(web::get().to(views::signup_form))
                    .route(web::post().to(views::signup)),
            )
            .service(web::resource("/api/token").route(web::post().to(views::create_api_token)))
            .service(
                web::resource("/api/books")
                    .guard(guard::Post())
                    .wrap(RequireLogin::reject(tokens.clone()))
                    .route(web::post().to(views::create_book)),
            )
            .service(web::resource("/api/books").route(web::get().to(views::list_books)))
            .service(web::resource("/api/books/{id:\\d+}").route(web::get().to(views::get_book)))
            .service(web::resource("/api/{tail:.*}").route(web::route().to(views::api_not_found)))
            .service(
                web::resource("/")
                    .name("list")
                    .route(web::get().to(views::list)),
            )
            .service(
                web::resource("/{id:\\d+}/")
                    .name("detail")
                    .route(web::get().to(views::detail)),
            )
            .service(
                web::resource("/{id:\\d+}/checkout/")
                    .name("checkout")
                    .wrap(RequireLogin::redirect(tokens, LOGIN_URL))
                    .route(web::get().to(views::checkout)),
            )
            .default_service(web::to(views::not_found));
    }
}

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub fn build(settings: Settings) -> Result<Self, ApplicationError> {
        if settings.uses_default_secret() {
            warn!("JWT_SECRET_KEY is not set, tokens are signed with the default secret");
        }

        let state = AppState::from_settings(&settings)?;
        let listener = TcpListener::bind(settings.address())?;
        let port = listener.local_addr()?.port();
        let server = run(listener, state)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        info!("Listening on port {}", self.port);
        self.server.await
    }
}

pub fn run(listener: TcpListener, state: AppState) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .configure(configure(state.clone()))
    })
    .listen(listener)?
    .run();

    Ok(server)
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Could not open the store: {0:?}")]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
