//! Typed HTTP adapter for the krishi diagnosis, enrichment, store-finder and
//! chat backend.

pub mod chat;
pub mod client;
pub mod diagnosis;
pub mod error;
pub mod stores;
pub mod types;

pub use client::BackendClient;
pub use error::ClientError;
