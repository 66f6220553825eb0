use log::info;
use mysql::prelude::*;
use mysql::{Opts, Pool, Row};

use super::{BookRepository, RepositoryError, UserRepository};
use crate::models::{Availability, Book, BookId, NewBook, User};

const SCHEMA: &str = include_str!("../../migrations/001_create_books_and_users.sql");

/// MySQL error code for a duplicate unique key
const ER_DUP_ENTRY: u16 = 1062;

/// Opens the connection pool and creates the tables when missing.
pub fn establish_connection(database_url: &str) -> Result<Pool, RepositoryError> {
    let opts = Opts::from_url(database_url).map_err(mysql::Error::from)?;
    let pool = Pool::new(opts)?;

    let mut conn = pool.get_conn()?;
    for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        conn.query_drop(statement)?;
    }
    info!("MySQL schema is ready");

    Ok(pool)
}

pub struct MysqlBookRepository {
    pool: Pool,
}

impl MysqlBookRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn book_from_row(row: Row) -> Result<Book, RepositoryError> {
    let (id, title, author, description, price, image_url, follow_author, book_available): (
        BookId,
        String,
        String,
        String,
        String,
        String,
        String,
        String,
    ) = mysql::from_row_opt(row).map_err(|e| RepositoryError::Corrupted(e.to_string()))?;

    let book_available = book_available
        .parse::<Availability>()
        .map_err(|e| RepositoryError::Corrupted(format!("book {}: {}", id, e)))?;

    Ok(Book {
        id,
        title,
        author,
        description,
        price,
        image_url,
        follow_author,
        book_available,
    })
}

const BOOK_COLUMNS: &str =
    "id, title, author, description, price, image_url, follow_author, book_available";

impl BookRepository for MysqlBookRepository {
    fn create(&self, book: NewBook) -> Result<Book, RepositoryError> {
        let mut conn = self.pool.get_conn()?;
        conn.exec_drop(
            "INSERT INTO books (title, author, description, price, image_url, follow_author, book_available) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                &book.title,
                &book.author,
                &book.description,
                &book.price,
                &book.image_url,
                &book.follow_author,
                book.book_available.to_string(),
            ),
        )?;
        let id = conn.last_insert_id();

        Ok(Book::from_new(id, book))
    }

    fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let mut conn = self.pool.get_conn()?;
        let rows: Vec<Row> =
            conn.query(format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS))?;

        rows.into_iter().map(book_from_row).collect()
    }

    fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let mut conn = self.pool.get_conn()?;
        let row: Option<Row> = conn.exec_first(
            format!("SELECT {} FROM books WHERE id = ?", BOOK_COLUMNS),
            (id,),
        )?;

        row.map(book_from_row).transpose()
    }
}

pub struct MysqlUserRepository {
    pool: Pool,
}

impl MysqlUserRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl UserRepository for MysqlUserRepository {
    fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut conn = self.pool.get_conn()?;
        let inserted = conn.exec_drop(
            "INSERT INTO users (username, email, password) VALUES (?, ?, ?)",
            (username, email, password_hash),
        );

        match inserted {
            Ok(()) => Ok(User {
                id: conn.last_insert_id(),
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            }),
            Err(mysql::Error::MySqlError(ref e)) if e.code == ER_DUP_ENTRY => {
                Err(RepositoryError::Conflict(format!("User {}", username)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get_conn()?;
        let row: Option<(u64, String, String, String)> = conn.exec_first(
            "SELECT id, username, email, password FROM users WHERE username = ?",
            (username,),
        )?;

        Ok(row.map(|(id, username, email, password_hash)| User {
            id,
            username,
            email,
            password_hash,
        }))
    }
}
