//! Entity counts of a deployment.

use serverest_client::{ApiClient, ApiResponse, ClientError, Filter};
use tracing::{info, warn};

fn report(collection: &str, response: &ApiResponse) {
    match response.count() {
        Some(count) if response.is_success() => info!("{collection}: {count}"),
        _ => warn!(
            status = response.status_code(),
            "{collection}: listing refused"
        ),
    }
}

/// Log how many users, products and carts the API holds.
///
/// # Errors
///
/// Returns an error on transport failure.
pub async fn show(client: &ApiClient) -> Result<(), ClientError> {
    let everything = Filter::new();

    info!("ServeRest status");
    info!("================");
    report("usuarios", &client.users().list(&everything).await?);
    report("produtos", &client.products().list(&everything).await?);
    report("carrinhos", &client.carts().list(&everything).await?);

    Ok(())
}
