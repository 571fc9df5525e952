//! `/produtos` commands.
//!
//! Create, update and delete are admin routes: without a token the server
//! answers 401, with a regular user's token 403.

use serde::Serialize;
use serverest_core::{NewProduct, Product, ProductId, Resource};
use tracing::{debug, instrument};

use crate::error::ClientError;
use crate::filter::Filter;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::lookup::Lookup;
use crate::token::AuthToken;

/// Product commands.
#[derive(Clone, Copy)]
pub struct Products<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Product commands bound to this client.
    #[must_use]
    pub const fn products(&self) -> Products<'_> {
        Products { client: self }
    }
}

impl Products<'_> {
    /// `POST /produtos`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip_all)]
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        product: &T,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send(
                ApiRequest::post(Product::PATH)
                    .with_token(token)
                    .with_body(product)?,
            )
            .await
    }

    /// Create each product in order, collecting every response.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    pub async fn create_all(
        &self,
        products: &[NewProduct],
        token: Option<&AuthToken>,
    ) -> Result<Vec<ApiResponse>, ClientError> {
        let mut responses = Vec::with_capacity(products.len());
        for product in products {
            responses.push(self.create(product, token).await?);
        }
        Ok(responses)
    }

    /// `GET /produtos[?filter]`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &Filter) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(Product::PATH).with_query(filter.clone()))
            .await
    }

    /// `GET /produtos/{id}`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &ProductId) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(format!("{}/{id}", Product::PATH)))
            .await
    }

    /// `PUT /produtos/{id}`. An unknown id creates the product.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self, product, token))]
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &ProductId,
        product: &T,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send(
                ApiRequest::put(format!("{}/{id}", Product::PATH))
                    .with_token(token)
                    .with_body(product)?,
            )
            .await
    }

    /// `DELETE /produtos/{id}`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self, token))]
    pub async fn delete(
        &self,
        id: &ProductId,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::delete(format!("{}/{id}", Product::PATH)).with_token(token))
            .await
    }

    /// Resolve a product name to the registered product.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or an undecodable match.
    pub async fn find_by_name(&self, name: &str) -> Result<Lookup<Product>, ClientError> {
        let response = self.list(&Filter::new().with("nome", name)).await?;
        Lookup::from_list(response)
    }

    /// Delete the product registered under `name`, if exactly one is.
    ///
    /// Returns `None` when the name did not resolve.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    #[instrument(skip(self, token))]
    pub async fn delete_by_name(
        &self,
        name: &str,
        token: Option<&AuthToken>,
    ) -> Result<Option<ApiResponse>, ClientError> {
        match self.find_by_name(name).await? {
            Lookup::Found(product) => self.delete(&product.id, token).await.map(Some),
            other => {
                debug!(?other, "Product not resolved, nothing to delete");
                Ok(None)
            }
        }
    }
}
