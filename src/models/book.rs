use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type BookId = u64;

/// Stock state of a book.
///
/// Stored and displayed as the strings `"True"` and `"False"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Availability {
    InStock,
    OutOfStock,
}

impl Availability {
    pub fn is_available(self) -> bool {
        matches!(self, Availability::InStock)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::InStock => "True",
            Availability::OutOfStock => "False",
        }
    }
}

impl Default for Availability {
    fn default() -> Self {
        Availability::InStock
    }
}

impl From<bool> for Availability {
    fn from(available: bool) -> Self {
        if available {
            Availability::InStock
        } else {
            Availability::OutOfStock
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid availability flag: {0:?}")]
pub struct InvalidAvailability(pub String);

impl FromStr for Availability {
    type Err = InvalidAvailability;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            v if v.eq_ignore_ascii_case("true") || v == "1" => Ok(Availability::InStock),
            v if v.eq_ignore_ascii_case("false") || v == "0" => Ok(Availability::OutOfStock),
            other => Err(InvalidAvailability(other.to_string())),
        }
    }
}

impl TryFrom<String> for Availability {
    type Error = InvalidAvailability;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Availability> for String {
    fn from(availability: Availability) -> Self {
        availability.as_str().to_string()
    }
}

/// A book of the catalog, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    /// Decimal amount kept as entered, e.g. `"30"`.
    pub price: String,
    pub image_url: String,
    pub follow_author: String,
    pub book_available: Availability,
}

impl Book {
    pub fn from_new(id: BookId, book: NewBook) -> Self {
        Self {
            id,
            title: book.title,
            author: book.author,
            description: book.description,
            price: book.price,
            image_url: book.image_url,
            follow_author: book.follow_author,
            book_available: book.book_available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.book_available.is_available()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// A book that has not been given an id by the store yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub follow_author: String,
    #[serde(default)]
    pub book_available: Availability,
}

impl NewBook {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}
