//! Seed a deployment with fixture data.
//!
//! Seeding is idempotent: every entity is deleted by its unique key and
//! created again with the fixture values.

use serverest_client::ApiClient;
use serverest_harness::{Fixtures, HarnessError, seed};
use tracing::{info, warn};

/// Recreate every fixture user.
///
/// # Errors
///
/// Returns an error on transport failure.
pub async fn users(client: &ApiClient, fixtures: &Fixtures) -> Result<(), HarnessError> {
    let total = fixtures.all_users().len();
    let created = seed::seed_users(client, fixtures).await?;

    info!("Seeding complete!");
    info!("  Users created: {created}/{total}");
    if created < total {
        warn!("  Users refused: {}", total - created);
    }
    Ok(())
}

/// Recreate every fixture product.
///
/// # Errors
///
/// Returns an error on transport failure or if the fixture admin cannot
/// log in.
pub async fn products(client: &ApiClient, fixtures: &Fixtures) -> Result<(), HarnessError> {
    let total = fixtures.all_products().len();
    let created = seed::seed_products(client, fixtures).await?;

    info!("Seeding complete!");
    info!("  Products created: {created}/{total}");
    if created < total {
        warn!("  Products refused (still in a cart?): {}", total - created);
    }
    Ok(())
}

/// Recreate the carts the cart listing scenarios query.
///
/// # Errors
///
/// Returns an error on transport failure or if a product or cart is
/// refused.
pub async fn carts(client: &ApiClient, fixtures: &Fixtures) -> Result<(), HarnessError> {
    let submissions = seed::seed_cart_listing(client, fixtures).await?;

    info!("Seeding complete!");
    for submission in &submissions {
        info!(
            "  Cart {}: {} lines",
            submission.response.id().unwrap_or("?"),
            submission.items.len()
        );
        for missing in &submission.unresolved {
            warn!(
                "    - {} left out: {:?}",
                missing.descriptor.name, missing.reason
            );
        }
    }
    Ok(())
}
