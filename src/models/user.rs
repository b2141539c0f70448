use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registered users, username to plaintext password
pub type UserDirectory = BTreeMap<String, String>;

/// Outcome of a login check, serialized as the label clients switch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LoginResult {
    #[serde(rename = "no_login_info")]
    NoCredentialsProvided,
    #[serde(rename = "admin")]
    AdminMatch,
    #[serde(rename = "user")]
    UserMatch,
    #[serde(rename = "login_failed")]
    Mismatch,
}

impl LoginResult {
    pub fn is_logged_in(self) -> bool {
        matches!(self, LoginResult::AdminMatch | LoginResult::UserMatch)
    }
}

/// Username and password as sent in the `X-Username` and `X-Password` headers
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
