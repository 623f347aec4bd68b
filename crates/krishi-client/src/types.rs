//! Wire shapes for backend responses.
//!
//! Fields the backend may omit are `Option` here so that a missing value can
//! be reported as [`crate::ClientError::MissingField`] (or treated as soft
//! absence) instead of a generic deserialization failure.

use krishi_core::{PlaceDetails, StoreRecord};
use serde::{Deserialize, Serialize};

/// `POST /predict`
#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predicted_disease: Option<String>,
    /// Index into the backend's class list; informational only.
    #[serde(default)]
    pub predicted_class: Option<i64>,
}

/// `GET /healthy_advice`
#[derive(Debug, Deserialize)]
pub struct AdviceResponse {
    #[serde(default)]
    pub advice: Option<String>,
}

/// `GET /disease_info`
#[derive(Debug, Deserialize)]
pub struct DiseaseInfoResponse {
    #[serde(default)]
    pub disease_info: Option<String>,
}

/// `GET /recommended_store_type`
#[derive(Debug, Deserialize)]
pub struct StoreTypeResponse {
    #[serde(default)]
    pub store_type: Option<String>,
}

/// `GET /store_finder`
#[derive(Debug, Deserialize)]
pub struct StoreFinderResponse {
    #[serde(default)]
    pub stores: Vec<StoreRecord>,
}

/// `GET /place_details`
#[derive(Debug, Deserialize)]
pub struct PlaceDetailsResponse {
    #[serde(default)]
    pub result: Option<PlaceDetails>,
}

/// `POST /chat` request body.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub prompt: &'a str,
}

/// `POST /chat`
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}
