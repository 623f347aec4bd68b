use thiserror::Error;

/// Errors returned by [`crate::BackendClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status. `message` carries the
    /// body's `error` field when one was present.
    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus {
        status: u16,
        endpoint: &'static str,
        message: Option<String>,
    },

    /// The body could not be parsed into the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx response lacked a field the caller cannot do without.
    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    /// The backend reported a business-level failure inside a 200 body.
    #[error("{endpoint} reported: {message}")]
    Domain {
        endpoint: &'static str,
        message: String,
    },

    /// The local image could not be read for upload.
    #[error("cannot read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl ClientError {
    /// `true` for failures that mean the backend never produced an answer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Http(_) | ClientError::UnexpectedStatus { .. }
        )
    }

    /// `true` when the backend answered 200 with an `error` field.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, ClientError::Domain { .. })
    }
}
