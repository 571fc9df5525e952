//! `/usuarios` commands.

use serde::Serialize;
use serverest_core::{NewUser, Resource, User, UserId};
use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::filter::Filter;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::lookup::Lookup;

/// User commands. None of the user routes require a token.
#[derive(Clone, Copy)]
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// User commands bound to this client.
    #[must_use]
    pub const fn users(&self) -> Users<'_> {
        Users { client: self }
    }
}

impl Users<'_> {
    /// `POST /usuarios`. Accepts any body so invalid payloads can be sent.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip_all)]
    pub async fn create<T: Serialize + ?Sized>(&self, user: &T) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::post(User::PATH).with_body(user)?)
            .await
    }

    /// Create each user in order, collecting every response.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    pub async fn create_all(&self, users: &[NewUser]) -> Result<Vec<ApiResponse>, ClientError> {
        let mut responses = Vec::with_capacity(users.len());
        for user in users {
            responses.push(self.create(user).await?);
        }
        Ok(responses)
    }

    /// `GET /usuarios[?filter]`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &Filter) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(User::PATH).with_query(filter.clone()))
            .await
    }

    /// `GET /usuarios/{id}`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &UserId) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(format!("{}/{id}", User::PATH)))
            .await
    }

    /// `PUT /usuarios/{id}`. An unknown id creates the user.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self, user))]
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &UserId,
        user: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::put(format!("{}/{id}", User::PATH)).with_body(user)?)
            .await
    }

    /// `DELETE /usuarios/{id}`. An unknown id answers 200 with
    /// "nothing deleted".
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &UserId) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::delete(format!("{}/{id}", User::PATH)))
            .await
    }

    /// Resolve an email to the registered user.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an undecodable match.
    pub async fn find_by_email(&self, email: &str) -> Result<Lookup<User>, ClientError> {
        let response = self.list(&Filter::new().with("email", email)).await?;
        Lookup::from_list(response)
    }

    /// Delete the user registered under `email`, if exactly one is.
    ///
    /// Returns `None` when nothing was attempted because the email did not
    /// resolve; the delete response otherwise (which may be a 400 when the
    /// user still owns a cart).
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    #[instrument(skip(self))]
    pub async fn delete_by_email(&self, email: &str) -> Result<Option<ApiResponse>, ClientError> {
        match self.find_by_email(email).await? {
            Lookup::Found(user) => self.delete(&user.id).await.map(Some),
            other => {
                debug!(?other, "User not resolved, nothing to delete");
                Ok(None)
            }
        }
    }
}
