//! Credential gate over the configured allow-list.

use crate::config::UserEntry;
use crate::errors::{AppError, AppResult};
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand_core::OsRng;

pub struct CredentialGate<'a> {
    users: &'a [UserEntry],
}

impl<'a> CredentialGate<'a> {
    pub fn new(users: &'a [UserEntry]) -> Self {
        Self { users }
    }

    /// True when `username` is on the allow-list and `password` matches its
    /// hash. Unknown users and wrong passwords are indistinguishable to the
    /// caller; an empty allow-list rejects everyone.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let Some(entry) = self.users.iter().find(|u| u.username == username) else {
            return false;
        };

        let Ok(parsed) = PasswordHash::new(&entry.password_hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hash a password into a PHC string suitable for the `users` list.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::PasswordHash(e.to_string()))
}
