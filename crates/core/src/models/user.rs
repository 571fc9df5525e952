//! User payloads.

use serde::{Deserialize, Serialize};

use crate::types::{AdminFlag, UserId};

/// Body of `POST /usuarios` and `PUT /usuarios/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "administrador")]
    pub admin: AdminFlag,
}

impl NewUser {
    /// Login credentials for this user.
    #[must_use]
    pub fn credentials(&self) -> super::Credentials {
        super::Credentials::new(&self.email, &self.password)
    }
}

/// A user as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: UserId,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "administrador")]
    pub admin: AdminFlag,
}

impl User {
    /// Attach a server-assigned id to a payload.
    #[must_use]
    pub fn from_new(id: UserId, user: NewUser) -> Self {
        Self {
            id,
            name: user.name,
            email: user.email,
            password: user.password,
            admin: user.admin,
        }
    }

    /// Login body for this user.
    #[must_use]
    pub fn credentials(&self) -> super::Credentials {
        super::Credentials::new(&self.email, &self.password)
    }

    /// Whether this user matches every field of `user`.
    #[must_use]
    pub fn matches(&self, user: &NewUser) -> bool {
        self.name == user.name
            && self.email == user.email
            && self.password == user.password
            && self.admin == user.admin
    }
}
