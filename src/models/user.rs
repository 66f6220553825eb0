use serde::{Deserialize, Serialize};
use std::fmt;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plain password
    pub password_hash: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSignin {
    pub username: String,
    pub password: String,
}
