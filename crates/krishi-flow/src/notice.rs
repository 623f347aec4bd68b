//! User-visible, dismissable notifications.

use krishi_client::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// A notice for a failed backend call, prefixed with what the user was doing.
    pub(crate) fn from_client(level: NoticeLevel, action: &str, err: &ClientError) -> Self {
        Self {
            level,
            message: format!("{action}: {}", describe(err)),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            NoticeLevel::Warning => write!(f, "warning: {}", self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Short, user-facing explanation of a client error.
///
/// Backend-provided messages are shown verbatim.
fn describe(err: &ClientError) -> String {
    match err {
        ClientError::Domain { message, .. } if message.trim().is_empty() => {
            "the server reported an error".to_string()
        }
        ClientError::Domain { message, .. }
        | ClientError::UnexpectedStatus {
            message: Some(message),
            ..
        } => message.clone(),
        ClientError::UnexpectedStatus { status, .. } => {
            format!("the server returned status {status}")
        }
        ClientError::Http(e) if e.is_timeout() => "the server took too long to respond".to_string(),
        ClientError::Http(_) => "could not reach the server".to_string(),
        ClientError::Deserialize { .. } | ClientError::MissingField { .. } => {
            "the server sent an unexpected response".to_string()
        }
        ClientError::Image { .. } => "the selected image could not be read".to_string(),
        ClientError::InvalidBaseUrl { .. } => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_message_is_shown_verbatim() {
        let err = ClientError::Domain {
            endpoint: "/store_finder",
            message: "No stores found nearby".to_string(),
        };
        let notice = Notice::from_client(NoticeLevel::Warning, "Failed to fetch store data", &err);
        assert_eq!(
            notice.message,
            "Failed to fetch store data: No stores found nearby"
        );
        assert_eq!(notice.level, NoticeLevel::Warning);
    }

    #[test]
    fn empty_domain_message_gets_generic_text() {
        let err = ClientError::Domain {
            endpoint: "/store_finder",
            message: String::new(),
        };
        let notice = Notice::from_client(NoticeLevel::Warning, "Failed to fetch store data", &err);
        assert_eq!(
            notice.message,
            "Failed to fetch store data: the server reported an error"
        );
    }

    #[test]
    fn status_without_message_mentions_code() {
        let err = ClientError::UnexpectedStatus {
            status: 502,
            endpoint: "/predict",
            message: None,
        };
        let notice = Notice::from_client(NoticeLevel::Error, "Diagnosis failed", &err);
        assert_eq!(notice.to_string(), "error: Diagnosis failed: the server returned status 502");
    }

    #[test]
    fn missing_field_is_unexpected_response() {
        let err = ClientError::MissingField {
            endpoint: "/healthy_advice",
            field: "advice",
        };
        let notice = Notice::from_client(NoticeLevel::Error, "Could not load advice", &err);
        assert!(notice.message.ends_with("unexpected response"));
    }
}
