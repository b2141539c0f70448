use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{Result, StoreError};
use crate::models::user::UserDirectory;

/// Read-only credential directory backed by a flat JSON object file
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Create a new UserStore reading from the provided file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all registered users.
    ///
    /// A missing or empty file means nobody has registered yet and yields an
    /// empty directory; unreadable or malformed files are errors.
    pub fn load(&self) -> Result<UserDirectory> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(
                    "Registered users file {} not found, treating as empty",
                    self.path.display()
                );
                return Ok(UserDirectory::new());
            }
            Err(e) => return Err(StoreError::unavailable(&self.path, e)),
        };

        if contents.trim().is_empty() {
            return Ok(UserDirectory::new());
        }

        let users: UserDirectory = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} registered users", users.len());
        Ok(users)
    }
}
