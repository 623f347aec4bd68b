//! Store-finder and place-detail endpoints.

use krishi_core::{Coordinates, PlaceDetails, StoreRecord};

use crate::client::BackendClient;
use crate::error::ClientError;
use crate::types::{PlaceDetailsResponse, StoreFinderResponse};

impl BackendClient {
    /// Searches for stores around `origin`, optionally filtered by store type.
    ///
    /// Stores are returned in backend order; nothing here sorts or
    /// deduplicates them.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Domain`] when the body carries an `error` field.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::Deserialize`] if a store entry has the wrong shape.
    pub async fn find_stores(
        &self,
        origin: Coordinates,
        store_type: Option<&str>,
    ) -> Result<Vec<StoreRecord>, ClientError> {
        const ENDPOINT: &str = "/store_finder";

        let lat = origin.latitude.to_string();
        let lon = origin.longitude.to_string();
        let mut params = vec![("lat", lat.as_str()), ("lon", lon.as_str())];
        if let Some(store_type) = store_type.filter(|s| !s.trim().is_empty()) {
            params.push(("store_type", store_type));
        }

        let url = self.build_url(ENDPOINT, &params);
        let body = self.get_json(ENDPOINT, &url).await?;
        let parsed: StoreFinderResponse = Self::decode(ENDPOINT, body)?;
        tracing::debug!(count = parsed.stores.len(), store_type, "stores found");
        Ok(parsed.stores)
    }

    /// Fetches phone, website and opening hours for one place.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Domain`] when the body carries an `error` field.
    /// - [`ClientError::MissingField`] if `result` is absent.
    /// - transport failures as for [`BackendClient::find_stores`].
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, ClientError> {
        const ENDPOINT: &str = "/place_details";

        let url = self.build_url(ENDPOINT, &[("place_id", place_id)]);
        let body = self.get_json(ENDPOINT, &url).await?;
        let parsed: PlaceDetailsResponse = Self::decode(ENDPOINT, body)?;
        parsed.result.ok_or(ClientError::MissingField {
            endpoint: ENDPOINT,
            field: "result",
        })
    }
}
