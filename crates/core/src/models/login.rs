//! Login payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Build credentials from an email and password.
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }
}

/// Successful `POST /login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token, already prefixed (`Bearer eyJ...`).
    pub authorization: String,
}
