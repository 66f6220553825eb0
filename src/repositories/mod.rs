pub mod memory;
pub mod mysql_store;

use crate::helper::error_chain_fmt;
use crate::models::{Book, BookId, NewBook, User};

pub use self::memory::{InMemoryBookRepository, InMemoryUserRepository};
pub use self::mysql_store::{establish_connection, MysqlBookRepository, MysqlUserRepository};

/// Book storage.
///
/// Implementations are blocking, handlers run them through `web::block`.
pub trait BookRepository: Send + Sync {
    /// Stores a book and returns it with the id issued by the store.
    fn create(&self, book: NewBook) -> Result<Book, RepositoryError>;

    /// Every book, ordered by id.
    fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError>;
}

/// User account storage.
pub trait UserRepository: Send + Sync {
    /// Stores an account, failing with `Conflict` when the username is taken.
    fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}

#[derive(thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Database(#[from] mysql::Error),
    #[error("{0} already exists")]
    Conflict(String),
    #[error("Stored record could not be read: {0}")]
    Corrupted(String),
    #[error("Store lock was poisoned")]
    Poisoned,
}

impl std::fmt::Debug for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
