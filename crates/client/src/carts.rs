//! `/carrinhos` commands.
//!
//! Creating and closing a cart act on the cart of the token's owner, so
//! every mutating command takes a token. Fixtures describe cart lines by
//! product name; [`Carts::create_with_items`] resolves them to product ids
//! first and reports any line it could not resolve.

use serde::Serialize;
use serverest_core::{Cart, CartId, CartItem, CartStatus, ItemDescriptor, NewCart, Product, Resource};
use tracing::{instrument, warn};

use crate::error::ClientError;
use crate::filter::Filter;
use crate::http::{ApiClient, ApiRequest, ApiResponse};
use crate::lookup::Lookup;
use crate::token::AuthToken;

/// What to do with cart lines whose product name does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionPolicy {
    /// Submit the resolved lines and report the others.
    #[default]
    Lenient,
    /// Submit nothing if any line is unresolved.
    Strict,
}

/// Why a cart line was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// No product has this name.
    NotFound,
    /// Several products matched the name.
    Ambiguous(u64),
    /// The product list answered with this status.
    LookupFailed(u16),
}

/// A cart line that could not be mapped to a product id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedItem {
    pub descriptor: ItemDescriptor,
    pub reason: UnresolvedReason,
}

/// Result of creating a cart from named items.
#[derive(Debug, Clone)]
pub struct CartSubmission {
    /// Lines actually submitted, in fixture order.
    pub items: Vec<CartItem>,
    /// Lines left out of the submitted cart.
    pub unresolved: Vec<UnresolvedItem>,
    /// Response to `POST /carrinhos`.
    pub response: ApiResponse,
}

impl CartSubmission {
    /// Whether every described line made it into the request.
    #[must_use]
    pub fn fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Map one descriptor and its lookup outcome to a cart line.
fn resolve_item(
    descriptor: &ItemDescriptor,
    lookup: Lookup<Product>,
) -> Result<CartItem, UnresolvedItem> {
    let reason = match lookup {
        Lookup::Found(product) => return Ok(CartItem::new(product.id, descriptor.quantity)),
        Lookup::Missing => UnresolvedReason::NotFound,
        Lookup::Ambiguous(n) => UnresolvedReason::Ambiguous(n),
        Lookup::Failed(response) => UnresolvedReason::LookupFailed(response.status_code()),
    };
    Err(UnresolvedItem {
        descriptor: descriptor.clone(),
        reason,
    })
}

/// Cart commands.
#[derive(Clone, Copy)]
pub struct Carts<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Cart commands bound to this client.
    #[must_use]
    pub const fn carts(&self) -> Carts<'_> {
        Carts { client: self }
    }
}

impl Carts<'_> {
    /// `POST /carrinhos` with a body as given.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip_all)]
    pub async fn create<T: Serialize + ?Sized>(
        &self,
        cart: &T,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        self.client
            .send(
                ApiRequest::post(Cart::PATH)
                    .with_token(token)
                    .with_body(cart)?,
            )
            .await
    }

    /// Resolve each descriptor by exact product name, in order.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure.
    pub async fn resolve_items(
        &self,
        items: &[ItemDescriptor],
    ) -> Result<(Vec<CartItem>, Vec<UnresolvedItem>), ClientError> {
        let mut resolved = Vec::with_capacity(items.len());
        let mut unresolved = Vec::new();

        for descriptor in items {
            let lookup = self.client.products().find_by_name(&descriptor.name).await?;
            match resolve_item(descriptor, lookup) {
                Ok(item) => resolved.push(item),
                Err(missing) => {
                    warn!(
                        product = %missing.descriptor.name,
                        reason = ?missing.reason,
                        "Cart item not resolved"
                    );
                    unresolved.push(missing);
                }
            }
        }

        Ok((resolved, unresolved))
    }

    /// Create a cart from named items, submitting whatever resolved.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    pub async fn create_with_items(
        &self,
        items: &[ItemDescriptor],
        token: Option<&AuthToken>,
    ) -> Result<CartSubmission, ClientError> {
        self.create_with_items_using(ResolutionPolicy::Lenient, items, token)
            .await
    }

    /// Create a cart from named items under an explicit policy.
    ///
    /// # Errors
    ///
    /// With [`ResolutionPolicy::Strict`], returns
    /// `ClientError::UnresolvedItems` without submitting when any line is
    /// unresolved. Otherwise only transport failures are errors.
    #[instrument(skip(self, items, token), fields(items = items.len()))]
    pub async fn create_with_items_using(
        &self,
        policy: ResolutionPolicy,
        items: &[ItemDescriptor],
        token: Option<&AuthToken>,
    ) -> Result<CartSubmission, ClientError> {
        let (resolved, unresolved) = self.resolve_items(items).await?;

        if policy == ResolutionPolicy::Strict && !unresolved.is_empty() {
            return Err(ClientError::UnresolvedItems(unresolved));
        }

        let cart = NewCart {
            products: resolved,
        };
        let response = self.create(&cart, token).await?;

        Ok(CartSubmission {
            items: cart.products,
            unresolved,
            response,
        })
    }

    /// `GET /carrinhos[?filter]`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &Filter) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(Cart::PATH).with_query(filter.clone()))
            .await
    }

    /// `GET /carrinhos/{id}`.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &CartId) -> Result<ApiResponse, ClientError> {
        self.client
            .send(ApiRequest::get(format!("{}/{id}", Cart::PATH)))
            .await
    }

    /// `DELETE /carrinhos/cancelar-compra`: drop the open cart and return
    /// its items to stock.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    pub async fn cancel(&self, token: Option<&AuthToken>) -> Result<ApiResponse, ClientError> {
        self.close(CartStatus::Canceled, token).await
    }

    /// `DELETE /carrinhos/concluir-compra`: drop the open cart keeping the
    /// stock already taken.
    ///
    /// # Errors
    ///
    /// Returns error only on transport failure.
    pub async fn finish(&self, token: Option<&AuthToken>) -> Result<ApiResponse, ClientError> {
        self.close(CartStatus::Finished, token).await
    }

    #[instrument(skip(self, token))]
    async fn close(
        &self,
        status: CartStatus,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, ClientError> {
        let route = status.closing_route().unwrap_or_default();
        self.client
            .send(ApiRequest::delete(format!("{}/{route}", Cart::PATH)).with_token(token))
            .await
    }
}
