use bcrypt::{hash, verify};

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// bcrypt cost used when accounts are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashing {
    pub cost: u32,
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    Ok(hash(password, cost)?)
}

/// `Ok(false)` on a wrong password, `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PasswordError> {
    Ok(verify(password, password_hash)?)
}
