//! Text chat with the crop assistant.

use crate::client::{non_blank, BackendClient};
use crate::error::ClientError;
use crate::types::{ChatRequest, ChatResponse};

impl BackendClient {
    /// Sends one prompt and returns the assistant's reply.
    ///
    /// # Errors
    ///
    /// Transport and domain errors, or [`ClientError::MissingField`] when the
    /// reply is empty.
    pub async fn chat(&self, prompt: &str) -> Result<String, ClientError> {
        const ENDPOINT: &str = "/chat";

        let url = self.build_url(ENDPOINT, &[]);
        tracing::debug!(endpoint = ENDPOINT, prompt_len = prompt.len(), "POST");
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { prompt })
            .send()
            .await?;
        let body = Self::read_json(ENDPOINT, response).await?;
        let parsed: ChatResponse = Self::decode(ENDPOINT, body)?;
        non_blank(parsed.response).ok_or(ClientError::MissingField {
            endpoint: ENDPOINT,
            field: "response",
        })
    }
}
