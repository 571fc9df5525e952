//! Removal of default and fixture data.
//!
//! Every routine is safe to run against a clean API: entities that are not
//! there are counted as absent, and refusals are collected instead of
//! aborting the sweep. Order matters when clearing everything. Open carts
//! block deleting their owner and their products, so carts go first.

use serde_json::Value;
use serverest_client::{ApiClient, ApiResponse, AuthToken, ClientError};
use serverest_core::{Cart, CartId, Credentials, DEFAULT_USER_ID, NewUser, User, UserId, messages};
use tracing::{debug, info, instrument, warn};

use crate::error::HarnessError;
use crate::fixtures::Fixtures;
use crate::seed;

/// Email of the user the API ships with.
pub const DEFAULT_USER_EMAIL: &str = "fulano@qa.com";
/// Password of the user the API ships with.
pub const DEFAULT_USER_PASSWORD: &str = "teste";

/// Outcome of a teardown sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    /// Entities removed (carts canceled count here too).
    pub deleted: usize,
    /// Entities that were not present.
    pub absent: usize,
    /// Refusals, as `subject: status message`.
    pub rejected: Vec<String>,
}

impl ResetReport {
    /// Whether the API refused nothing.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Fold another sweep into this one.
    pub fn merge(&mut self, other: Self) {
        self.deleted += other.deleted;
        self.absent += other.absent;
        self.rejected.extend(other.rejected);
    }

    /// Record the answer to a delete (or cancel) issued for `subject`.
    ///
    /// `None` means the subject could not be located at all.
    pub fn record(&mut self, subject: &str, response: Option<&ApiResponse>) {
        let Some(response) = response else {
            self.absent += 1;
            return;
        };

        let message = response.message().unwrap_or_default();
        if !response.is_success() {
            warn!(
                subject,
                status = response.status_code(),
                reason = message,
                "Removal refused"
            );
            self.rejected
                .push(format!("{subject}: {} {message}", response.status_code()));
        } else if message == messages::NOTHING_DELETED || message == messages::NO_CART_FOR_USER {
            self.absent += 1;
        } else {
            self.deleted += 1;
        }
    }
}

/// Remove the user the API ships with, canceling its cart first so the
/// default products are released.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip(client))]
pub async fn clear_default_data(client: &ApiClient) -> Result<ResetReport, HarnessError> {
    let mut report = ResetReport::default();

    let credentials = Credentials::new(DEFAULT_USER_EMAIL, DEFAULT_USER_PASSWORD);
    report.merge(cancel_cart_of(client, &credentials).await?);

    let response = client.users().delete(&UserId::new(DEFAULT_USER_ID)).await?;
    report.record(DEFAULT_USER_EMAIL, Some(&response));

    info!(deleted = report.deleted, absent = report.absent, "Default data cleared");
    Ok(report)
}

/// Cancel the open cart of every fixture user, returning its items to
/// stock.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip_all)]
pub async fn clear_cart_data(
    client: &ApiClient,
    fixtures: &Fixtures,
) -> Result<ResetReport, HarnessError> {
    let mut report = ResetReport::default();
    for user in fixtures.all_users() {
        report.merge(cancel_cart_of(client, &user.credentials()).await?);
    }

    info!(canceled = report.deleted, "Fixture carts cleared");
    Ok(report)
}

/// Delete every fixture user by email.
///
/// Users still owning an open cart are refused by the API; run
/// [`clear_cart_data`] first.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip_all)]
pub async fn clear_user_data(
    client: &ApiClient,
    fixtures: &Fixtures,
) -> Result<ResetReport, HarnessError> {
    let users = fixtures.all_users();
    let report = delete_users(client, &users).await?;

    info!(deleted = report.deleted, absent = report.absent, "Fixture users cleared");
    Ok(report)
}

/// Delete every fixture product by name, using an administrator token.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip_all)]
pub async fn clear_product_data(
    client: &ApiClient,
    fixtures: &Fixtures,
    token: &AuthToken,
) -> Result<ResetReport, HarnessError> {
    let mut report = ResetReport::default();
    for product in fixtures.all_products() {
        let response = client
            .products()
            .delete_by_name(&product.name, Some(token))
            .await?;
        report.record(&product.name, response.as_ref());
    }

    info!(deleted = report.deleted, absent = report.absent, "Fixture products cleared");
    Ok(report)
}

/// Clear default and fixture data: carts, then products, then users.
///
/// Products are deleted with a session of the fixture cart admin, which is
/// created for the purpose and removed with the other users.
///
/// # Errors
///
/// Returns error on transport failure or if no admin session can be
/// opened.
#[instrument(skip_all)]
pub async fn reset_all(client: &ApiClient, fixtures: &Fixtures) -> Result<ResetReport, HarnessError> {
    let mut report = clear_default_data(client).await?;
    report.merge(clear_cart_data(client, fixtures).await?);

    let admin = seed::session(client, &fixtures.carts.admin).await?;
    report.merge(clear_product_data(client, fixtures, &admin.token).await?);
    report.merge(clear_user_data(client, fixtures).await?);

    if report.is_clean() {
        info!(deleted = report.deleted, absent = report.absent, "Reset complete");
    } else {
        warn!(rejected = report.rejected.len(), "Reset left data behind");
    }
    Ok(report)
}

/// Cancel the open cart of whoever `credentials` belong to.
///
/// A user that cannot log in has no cart to cancel and counts as absent.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn cancel_cart_of(
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<ResetReport, ClientError> {
    let mut report = ResetReport::default();
    let Some(token) = client.login().try_token(credentials).await? else {
        report.record(&credentials.email, None);
        return Ok(report);
    };

    let response = client.carts().cancel(Some(&token)).await?;
    report.record(&credentials.email, Some(&response));
    Ok(report)
}

/// Cancel the carts a refused product delete names under `idCarrinhos`.
///
/// Each owner is found through the cart's `idUsuario` and logged in with
/// the password the API stores. A cart or owner that no longer resolves
/// counts as absent.
///
/// # Errors
///
/// Returns error only on transport failure.
#[instrument(skip_all)]
pub async fn release_carts(
    client: &ApiClient,
    refusal: &ApiResponse,
) -> Result<ResetReport, ClientError> {
    let mut report = ResetReport::default();
    for cart_id in refusal.items("idCarrinhos").iter().filter_map(Value::as_str) {
        let Ok(cart) = client.carts().get(&CartId::new(cart_id)).await?.decode::<Cart>() else {
            debug!(cart_id, "Cart already gone");
            report.record(cart_id, None);
            continue;
        };
        let Ok(owner) = client.users().get(&cart.user_id).await?.decode::<User>() else {
            debug!(cart_id, "Cart owner not found");
            report.record(cart_id, None);
            continue;
        };
        report.merge(cancel_cart_of(client, &owner.credentials()).await?);
    }
    Ok(report)
}

async fn delete_users(client: &ApiClient, users: &[&NewUser]) -> Result<ResetReport, ClientError> {
    let mut report = ResetReport::default();
    for user in users {
        let response = client.users().delete_by_email(&user.email).await?;
        report.record(&user.email, response.as_ref());
    }
    Ok(report)
}
