//! `krishi diagnose`: photo to advice, optionally followed by a store search.

use std::path::PathBuf;
use std::sync::Arc;

use krishi_client::BackendClient;
use krishi_core::{Coordinates, ImageSource};
use krishi_flow::{DiagnosisController, DiagnosisPhase, StoreResolverController};

use crate::devices::{FileImagePicker, FixedLocation};
use crate::render;

/// Diagnoses `image` and prints the advice.
///
/// With `origin`, stores for the recommended remedy category are listed
/// afterwards. The category itself is never printed.
///
/// # Errors
///
/// Returns an error if the image cannot be read or the diagnosis does not
/// reach the ready state. Store lookup failures are reported as notices only.
pub(crate) async fn run_diagnose(
    client: Arc<BackendClient>,
    image: PathBuf,
    source: ImageSource,
    origin: Option<Coordinates>,
) -> anyhow::Result<()> {
    let mut diagnosis = DiagnosisController::new(Arc::clone(&client), FileImagePicker::new(image));
    diagnosis.acquire_image(source).await;
    diagnosis.submit_for_diagnosis();
    diagnosis.settle().await;
    render::notices(&diagnosis.take_notices());

    let session = diagnosis.session();
    if session.phase() != DiagnosisPhase::Ready {
        anyhow::bail!("diagnosis did not complete");
    }
    if let Some(label) = session.display_label() {
        println!("Diagnosis: {label}");
    }
    render::sections(&session.enrichment_sections());

    match (origin, diagnosis.proceed_to_store_resolver()) {
        (Some(origin), Some(handoff)) => {
            let mut stores =
                StoreResolverController::new(client, Arc::new(FixedLocation::new(origin)));
            stores.activate_from(handoff);
            stores.settle().await;
            render::notices(&stores.take_notices());
            println!();
            println!("Nearby stores:");
            render::store_list(stores.resolver().stores());
        }
        (Some(_), None) => {
            println!();
            println!("No store recommendation for this diagnosis.");
        }
        (None, Some(_)) => {
            println!();
            println!("Find local stores with --find-stores --lat <LAT> --lon <LON>.");
        }
        (None, None) => {}
    }
    Ok(())
}
