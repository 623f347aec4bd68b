//! `krishi stores` and `krishi details`.

use std::sync::Arc;

use krishi_client::BackendClient;
use krishi_core::Coordinates;
use krishi_flow::{DetailPhase, ResolverPhase, StoreResolverController};

use crate::devices::FixedLocation;
use crate::render;

/// Lists stores around `origin`, then optionally expands the `select`-th one.
pub(crate) async fn run_stores(
    client: Arc<BackendClient>,
    origin: Coordinates,
    store_type: Option<String>,
    select: Option<usize>,
) -> anyhow::Result<()> {
    let mut stores = StoreResolverController::new(client, Arc::new(FixedLocation::new(origin)));
    stores.activate(store_type);
    stores.settle().await;
    render::notices(&stores.take_notices());

    if stores.resolver().phase() != ResolverPhase::Listed {
        anyhow::bail!("store search did not complete");
    }
    render::store_list(stores.resolver().stores());

    let Some(position) = select else {
        return Ok(());
    };
    let selected = position
        .checked_sub(1)
        .is_some_and(|index| stores.select_store_at(index));
    if !selected {
        anyhow::bail!(
            "no store at position {position}; {} listed",
            stores.resolver().stores().len()
        );
    }
    stores.settle().await;
    render::notices(&stores.take_notices());

    println!();
    let resolver = stores.resolver();
    match (resolver.detail_phase(), resolver.details(), resolver.selected()) {
        (DetailPhase::DetailReady, Some(details), _) => render::place_details(details),
        (_, _, Some(store)) => render::store_summary(store),
        _ => {}
    }
    Ok(())
}

/// Prints details for a single place.
///
/// # Errors
///
/// Returns the client error when the lookup fails.
pub(crate) async fn run_details(client: &BackendClient, place_id: &str) -> anyhow::Result<()> {
    let details = client.place_details(place_id).await?;
    render::place_details(&details);
    Ok(())
}
