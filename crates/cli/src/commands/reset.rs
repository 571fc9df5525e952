//! Teardown commands.
//!
//! Each command sweeps what it can and then fails if the API refused any
//! removal, so a scripted reset stops before scenarios run on dirty data.

use serverest_client::ApiClient;
use serverest_harness::reset::{self, ResetReport};
use serverest_harness::{Fixtures, HarnessError, seed};
use thiserror::Error;
use tracing::{info, warn};

/// The sweep finished but left data behind.
#[derive(Debug, Error)]
#[error("{count} removals refused: {}", .rejected.join("; "))]
pub struct IncompleteReset {
    pub count: usize,
    pub rejected: Vec<String>,
}

pub async fn carts(client: &ApiClient, fixtures: &Fixtures) -> Result<ResetReport, HarnessError> {
    reset::clear_cart_data(client, fixtures).await
}

/// Users that still own a cart are refused; run `reset carts` first or use
/// `reset all`.
pub async fn users(client: &ApiClient, fixtures: &Fixtures) -> Result<ResetReport, HarnessError> {
    reset::clear_user_data(client, fixtures).await
}

/// Deletes as the fixture cart admin, registering it if needed.
pub async fn products(
    client: &ApiClient,
    fixtures: &Fixtures,
) -> Result<ResetReport, HarnessError> {
    let admin = seed::session(client, &fixtures.carts.admin).await?;
    reset::clear_product_data(client, fixtures, &admin.token).await
}

pub async fn defaults(client: &ApiClient) -> Result<ResetReport, HarnessError> {
    reset::clear_default_data(client).await
}

pub async fn all(client: &ApiClient, fixtures: &Fixtures) -> Result<ResetReport, HarnessError> {
    reset::reset_all(client, fixtures).await
}

/// Log the totals of a sweep.
///
/// # Errors
///
/// Returns `IncompleteReset` listing every refusal when the sweep was not
/// clean.
pub fn conclude(report: &ResetReport) -> Result<(), IncompleteReset> {
    info!(
        deleted = report.deleted,
        absent = report.absent,
        "Reset finished"
    );

    if report.is_clean() {
        return Ok(());
    }

    for refusal in &report.rejected {
        warn!("  - {refusal}");
    }
    Err(IncompleteReset {
        count: report.rejected.len(),
        rejected: report.rejected.clone(),
    })
}
