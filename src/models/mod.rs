pub mod book;
pub mod user;

pub use book::{Availability, Book, BookId, InvalidAvailability, NewBook};
pub use user::{User, UserId, UserSignin};
