//! Login rules for the quiz bank.
//!
//! Passwords are stored and compared in plaintext. This mirrors the data the
//! service is fed and is not fit for anything beyond a teaching setup.

use crate::models::user::{Credentials, LoginResult, UserDirectory};

/// The privileged identity. It is checked before the directory and does not
/// need an entry there.
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "4dm1n";

pub fn is_admin(credentials: &Credentials) -> bool {
    credentials.username == ADMIN_USERNAME && credentials.password == ADMIN_PASSWORD
}

/// Classifies a login attempt against the registered users.
pub fn lookup(credentials: &Credentials, directory: &UserDirectory) -> LoginResult {
    if credentials.username.is_empty() || credentials.password.is_empty() {
        return LoginResult::NoCredentialsProvided;
    }

    if is_admin(credentials) {
        return LoginResult::AdminMatch;
    }

    match directory.get(&credentials.username) {
        Some(password) if *password == credentials.password => LoginResult::UserMatch,
        _ => LoginResult::Mismatch,
    }
}
