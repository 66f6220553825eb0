use std::sync::RwLock;

use super::{BookRepository, RepositoryError, UserRepository};
use crate::models::{Book, BookId, NewBook, User};

/// Book store kept in process memory. Ids start at 1.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn create(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let mut books = self.books.write().map_err(|_| RepositoryError::Poisoned)?;
        let id = books.last().map_or(1, |last| last.id + 1);
        let book = Book::from_new(id, book);
        books.push(book.clone());
        Ok(book)
    }

    fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let books = self.books.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(books.clone())
    }

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let books = self.books.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(books.iter().find(|book| book.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().map_err(|_| RepositoryError::Poisoned)?;
        if users.iter().any(|user| user.username == username) {
            return Err(RepositoryError::Conflict(format!("User {}", username)));
        }

        let user = User {
            id: users.last().map_or(1, |last| last.id + 1),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(users.iter().find(|user| user.username == username).cloned())
    }
}
