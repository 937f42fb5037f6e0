//! External service ports.

use super::error::PasswordError;

/// One-way password hashing.
///
/// Hashes are self-describing strings (algorithm, parameters and salt included), so a
/// stored hash is all `verify` needs.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasherPort: Send + Sync {
    fn hash(&self, plain: &str) -> Result<String, PasswordError>;

    /// `false` for a wrong password and for a hash that cannot be parsed.
    fn verify(&self, plain: &str, hash: &str) -> bool;
}
