//! Idempotent creation of fixture data.
//!
//! Seeding deletes whatever already carries the fixture's unique key
//! (email for users, name for products) and creates it again, so a
//! scenario always starts from the exact fixture values.

use serverest_client::{
    ApiClient, ApiResponse, AuthToken, CartSubmission, ClientError, Lookup,
};
use serverest_core::{ItemDescriptor, NewProduct, NewUser, messages};
use tracing::{debug, info, instrument, warn};

use crate::error::HarnessError;
use crate::fixtures::{Fixtures, UserCart};
use crate::reset::{cancel_cart_of, release_carts};

/// A fixture user logged in.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: NewUser,
    pub token: AuthToken,
}

/// Turn a refused setup step into an error.
///
/// # Errors
///
/// Returns `HarnessError::Rejected` unless `response` is a 2xx.
pub fn require_success(step: &str, response: ApiResponse) -> Result<ApiResponse, HarnessError> {
    if response.is_success() {
        return Ok(response);
    }
    Err(HarnessError::Rejected {
        step: step.to_string(),
        status: response.status_code(),
        message: response.message().unwrap_or_default().to_string(),
    })
}

/// Recreate `user` from scratch.
///
/// A previous copy that still owns an open cart is unblocked by canceling
/// the cart with the fixture credentials.
///
/// # Errors
///
/// Returns error only on transport failure; the creation response is
/// returned whatever its status.
#[instrument(skip_all, fields(email = %user.email))]
pub async fn ensure_user(client: &ApiClient, user: &NewUser) -> Result<ApiResponse, ClientError> {
    if let Lookup::Found(existing) = client.users().find_by_email(&user.email).await? {
        let mut response = client.users().delete(&existing.id).await?;

        if response.message() == Some(messages::USER_HAS_CART) {
            debug!("Existing user owns a cart, canceling it");
            cancel_cart_of(client, &existing.credentials()).await?;
            response = client.users().delete(&existing.id).await?;
        }

        if !response.is_success() {
            warn!(
                status = response.status_code(),
                reason = response.message().unwrap_or_default(),
                "Could not remove existing user"
            );
        }
    }

    client.users().create(user).await
}

/// Recreate every user in order.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn ensure_users(
    client: &ApiClient,
    users: &[NewUser],
) -> Result<Vec<ApiResponse>, ClientError> {
    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        responses.push(ensure_user(client, user).await?);
    }
    Ok(responses)
}

/// Recreate `product` from scratch with an administrator token.
///
/// Carts still holding a previous copy are canceled first, as their owners.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip_all, fields(name = %product.name))]
pub async fn ensure_product(
    client: &ApiClient,
    product: &NewProduct,
    token: &AuthToken,
) -> Result<ApiResponse, ClientError> {
    let mut removed = client
        .products()
        .delete_by_name(&product.name, Some(token))
        .await?;

    if let Some(refusal) = removed
        .clone()
        .filter(|response| response.message() == Some(messages::PRODUCT_IN_CART))
    {
        debug!("Existing product is in a cart, canceling it");
        release_carts(client, &refusal).await?;
        removed = client
            .products()
            .delete_by_name(&product.name, Some(token))
            .await?;
    }

    if let Some(response) = removed.filter(|response| !response.is_success()) {
        warn!(
            status = response.status_code(),
            reason = response.message().unwrap_or_default(),
            "Could not remove existing product"
        );
    }

    client.products().create(product, Some(token)).await
}

/// Recreate every product in order.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn ensure_products(
    client: &ApiClient,
    products: &[NewProduct],
    token: &AuthToken,
) -> Result<Vec<ApiResponse>, ClientError> {
    let mut responses = Vec::with_capacity(products.len());
    for product in products {
        responses.push(ensure_product(client, product, token).await?);
    }
    Ok(responses)
}

/// Log `user` in, registering it first if needed.
///
/// An existing account with the same email but other values is replaced.
///
/// # Errors
///
/// Returns `HarnessError::Rejected` if the user cannot be created or
/// still cannot log in.
#[instrument(skip_all, fields(email = %user.email))]
pub async fn session(client: &ApiClient, user: &NewUser) -> Result<Session, HarnessError> {
    let created = client.users().create(user).await?;
    if !created.is_success() && created.message() != Some(messages::EMAIL_TAKEN) {
        require_success("create session user", created)?;
    }

    let credentials = user.credentials();
    if let Some(token) = client.login().try_token(&credentials).await? {
        return Ok(Session {
            user: user.clone(),
            token,
        });
    }

    debug!("Stored account differs from fixture, recreating");
    require_success("recreate session user", ensure_user(client, user).await?)?;

    let token = client.login().token(&credentials).await?;
    Ok(Session {
        user: user.clone(),
        token,
    })
}

/// Open a cart for `owner` with named items, replacing any open cart.
///
/// The returned submission carries the creation response and any item
/// that did not resolve to a product.
///
/// # Errors
///
/// Returns error on transport failure or if the owner cannot log in.
#[instrument(skip_all, fields(email = %owner.email, items = items.len()))]
pub async fn open_cart(
    client: &ApiClient,
    owner: &NewUser,
    items: &[ItemDescriptor],
) -> Result<(Session, CartSubmission), HarnessError> {
    let session = session(client, owner).await?;
    client.carts().cancel(Some(&session.token)).await?;

    let submission = client
        .carts()
        .create_with_items(items, Some(&session.token))
        .await?;
    Ok((session, submission))
}

/// Seed the products and carts the cart listing scenarios query.
///
/// # Errors
///
/// Returns error on transport failure or if a product or cart is refused.
#[instrument(skip_all)]
pub async fn seed_cart_listing(
    client: &ApiClient,
    fixtures: &Fixtures,
) -> Result<Vec<CartSubmission>, HarnessError> {
    let data = &fixtures.carts.list.data;
    let admin = session(client, &fixtures.carts.admin).await?;

    for response in ensure_products(client, &data.products, &admin.token).await? {
        require_success("create listed product", response)?;
    }

    let mut submissions = Vec::with_capacity(data.carts.len());
    for UserCart { user, items } in &data.carts {
        require_success("create cart owner", ensure_user(client, user).await?)?;
        let (_, submission) = open_cart(client, user, items).await?;
        require_success("create listed cart", submission.response.clone())?;
        submissions.push(submission);
    }

    info!(carts = submissions.len(), "Cart listing seeded");
    Ok(submissions)
}

/// Seed every user any fixture declares.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn seed_users(client: &ApiClient, fixtures: &Fixtures) -> Result<usize, HarnessError> {
    let mut created = 0;
    for user in fixtures.all_users() {
        if ensure_user(client, user).await?.is_success() {
            created += 1;
        }
    }

    info!(created, "Fixture users seeded");
    Ok(created)
}

/// Seed every product any fixture declares, as the fixture cart admin.
///
/// # Errors
///
/// Returns error on transport failure or if the admin cannot log in.
pub async fn seed_products(client: &ApiClient, fixtures: &Fixtures) -> Result<usize, HarnessError> {
    let admin = session(client, &fixtures.carts.admin).await?;

    let mut created = 0;
    for product in fixtures.all_products() {
        if ensure_product(client, product, &admin.token)
            .await?
            .is_success()
        {
            created += 1;
        }
    }

    info!(created, "Fixture products seeded");
    Ok(created)
}
