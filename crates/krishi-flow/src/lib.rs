//! Client-side orchestration for crop diagnosis and remedy-store lookup.
//!
//! Two state machines drive the workflow:
//!
//! - [`DiagnosisSession`]: image → classification → enrichment text, with the
//!   recommended store category resolved alongside.
//! - [`StoreResolver`]: location → store search → on-demand place details.
//!
//! Each machine is a plain struct mutated only by its `reduce` method, which
//! returns the backend/device work to perform as effects. The controllers
//! run those effects on a single task and feed the completions back in as
//! events. Every pending effect carries the [`Generation`] that issued it,
//! and a completion whose generation is no longer current is dropped.

pub mod backend;
pub mod chat;
pub mod device;
pub mod diagnosis;
pub mod generation;
pub mod notice;
mod runner;
pub mod store;

pub use backend::{ChatBackend, DiagnosisBackend, StoreBackend};
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use device::{DeviceError, ImagePicker, LocationProvider, PermissionStatus};
pub use diagnosis::{
    CategoryPhase, DiagnosisController, DiagnosisEffect, DiagnosisEvent, DiagnosisPhase,
    DiagnosisSession, EnrichmentPath, StoreHandoff,
};
pub use generation::Generation;
pub use notice::{Notice, NoticeLevel};
pub use store::{
    DetailPhase, ResolverPhase, StoreEffect, StoreEvent, StoreResolver, StoreResolverController,
};
