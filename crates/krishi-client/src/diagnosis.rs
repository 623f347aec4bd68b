//! Classification, enrichment and store-category endpoints.

use krishi_core::ImageRef;
use reqwest::multipart::{Form, Part};

use crate::client::{non_blank, BackendClient};
use crate::error::ClientError;
use crate::types::{AdviceResponse, DiseaseInfoResponse, PredictResponse, StoreTypeResponse};

impl BackendClient {
    /// Uploads the image as the single multipart field `image` and returns the
    /// predicted label.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Image`] if the file cannot be read.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::MissingField`] if `predicted_disease` is absent or blank.
    ///
    /// A non-blank label is returned untrimmed.
    pub async fn classify_image(&self, image: &ImageRef) -> Result<String, ClientError> {
        const ENDPOINT: &str = "/predict";

        let bytes = tokio::fs::read(image.path())
            .await
            .map_err(|e| ClientError::Image {
                path: image.path().display().to_string(),
                source: e,
            })?;
        let part = Part::bytes(bytes)
            .file_name(image.file_name().to_owned())
            .mime_str(image.mime())?;
        let form = Form::new().part("image", part);

        let url = self.build_url(ENDPOINT, &[]);
        tracing::debug!(endpoint = ENDPOINT, file = image.file_name(), "uploading image");
        let response = self.client.post(&url).multipart(form).send().await?;
        let body = Self::read_json(ENDPOINT, response).await?;
        let parsed: PredictResponse = Self::decode(ENDPOINT, body)?;

        // Forwarded to the enrichment endpoints exactly as received.
        parsed
            .predicted_disease
            .filter(|label| !label.trim().is_empty())
            .ok_or(ClientError::MissingField {
                endpoint: ENDPOINT,
                field: "predicted_disease",
            })
    }

    /// Fetches general advice for keeping a healthy crop healthy.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`ClientError::MissingField`] if `advice` is absent.
    pub async fn healthy_advice(&self) -> Result<String, ClientError> {
        const ENDPOINT: &str = "/healthy_advice";

        let url = self.build_url(ENDPOINT, &[]);
        let body = self.get_json(ENDPOINT, &url).await?;
        let parsed: AdviceResponse = Self::decode(ENDPOINT, body)?;
        non_blank(parsed.advice).ok_or(ClientError::MissingField {
            endpoint: ENDPOINT,
            field: "advice",
        })
    }

    /// Fetches the description, causes and remedies for a disease label.
    ///
    /// # Errors
    ///
    /// Transport failures, or [`ClientError::MissingField`] if `disease_info` is absent.
    pub async fn disease_info(&self, disease_name: &str) -> Result<String, ClientError> {
        const ENDPOINT: &str = "/disease_info";

        let url = self.build_url(ENDPOINT, &[("disease_name", disease_name)]);
        let body = self.get_json(ENDPOINT, &url).await?;
        let parsed: DiseaseInfoResponse = Self::decode(ENDPOINT, body)?;
        non_blank(parsed.disease_info).ok_or(ClientError::MissingField {
            endpoint: ENDPOINT,
            field: "disease_info",
        })
    }

    /// Asks which kind of store sells remedies for `disease_name`.
    ///
    /// An absent or blank `store_type` is `Ok(None)`: no recommendation, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Transport failures and domain errors only.
    pub async fn recommended_store_type(
        &self,
        disease_name: &str,
    ) -> Result<Option<String>, ClientError> {
        const ENDPOINT: &str = "/recommended_store_type";

        let url = self.build_url(ENDPOINT, &[("disease_name", disease_name)]);
        let body = self.get_json(ENDPOINT, &url).await?;
        let parsed: StoreTypeResponse = Self::decode(ENDPOINT, body)?;
        Ok(non_blank(parsed.store_type))
    }
}
