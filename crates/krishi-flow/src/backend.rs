//! Backend seams used by the state-machine controllers.
//!
//! [`BackendClient`] implements all three; tests substitute scripted fakes.

use async_trait::async_trait;
use krishi_client::{BackendClient, ClientError};
use krishi_core::{Coordinates, ImageRef, PlaceDetails, StoreRecord};

#[async_trait]
pub trait DiagnosisBackend: Send + Sync {
    async fn classify(&self, image: &ImageRef) -> Result<String, ClientError>;

    async fn healthy_advice(&self) -> Result<String, ClientError>;

    async fn disease_info(&self, label: &str) -> Result<String, ClientError>;

    async fn recommended_store_type(&self, label: &str) -> Result<Option<String>, ClientError>;
}

#[async_trait]
pub trait StoreBackend: Send + Sync {
    async fn find_stores(
        &self,
        origin: Coordinates,
        store_type: Option<&str>,
    ) -> Result<Vec<StoreRecord>, ClientError>;

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ClientError>;
}

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, prompt: &str) -> Result<String, ClientError>;
}

#[async_trait]
impl DiagnosisBackend for BackendClient {
    async fn classify(&self, image: &ImageRef) -> Result<String, ClientError> {
        BackendClient::classify_image(self, image).await
    }

    async fn healthy_advice(&self) -> Result<String, ClientError> {
        BackendClient::healthy_advice(self).await
    }

    async fn disease_info(&self, label: &str) -> Result<String, ClientError> {
        BackendClient::disease_info(self, label).await
    }

    async fn recommended_store_type(&self, label: &str) -> Result<Option<String>, ClientError> {
        BackendClient::recommended_store_type(self, label).await
    }
}

#[async_trait]
impl StoreBackend for BackendClient {
    async fn find_stores(
        &self,
        origin: Coordinates,
        store_type: Option<&str>,
    ) -> Result<Vec<StoreRecord>, ClientError> {
        BackendClient::find_stores(self, origin, store_type).await
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ClientError> {
        BackendClient::place_details(self, place_id).await
    }
}

#[async_trait]
impl ChatBackend for BackendClient {
    async fn chat(&self, prompt: &str) -> Result<String, ClientError> {
        BackendClient::chat(self, prompt).await
    }
}
