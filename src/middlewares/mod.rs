pub mod require_login;

pub use require_login::{login_redirect, RequireLogin, Unauthenticated};
