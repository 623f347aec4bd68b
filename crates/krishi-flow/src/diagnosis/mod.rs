//! Image capture through diagnosis, enrichment and store-category resolution.

mod controller;
mod session;

pub use controller::DiagnosisController;
pub use session::{
    CategoryPhase, DiagnosisEffect, DiagnosisEvent, DiagnosisPhase, DiagnosisSession,
    EnrichmentPath, StoreHandoff,
};
