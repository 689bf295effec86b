//! Error types module
//!
//! All client-side failures are unified under the `ClientError` enum. Every
//! variant is terminal for the attempt it occurred in and carries enough
//! context to render a user-facing message; nothing here aborts the process.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Local input validation failure. Never reaches the network.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The server accepted the request but the credentials do not match.
    #[error("Credentials rejected")]
    AuthRejected,

    /// The server does not know the given email (forgot-PIN only).
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 429 with a server-suggested retry delay.
    #[error("Rate limited: retry in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u32 },

    /// Non-2xx response without a more specific meaning.
    #[error("Server error: {0}")]
    Server(String),

    /// Transport failure or an unreadable response body.
    #[error("Network error: {0}")]
    Network(String),

    /// 2xx response missing fields the contract requires.
    #[error("Incomplete response: {0}")]
    IncompleteResponse(String),
}

impl ClientError {
    /// Message suitable for direct display. The `Display` impl stays
    /// diagnostic; this is what the view layer renders.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::AuthRejected => "Email and PIN do not match.".to_string(),
            ClientError::NotFound(msg) => msg.clone(),
            ClientError::RateLimited { .. } => {
                "Please wait a moment before sending again.".to_string()
            }
            ClientError::Server(msg) => msg.clone(),
            ClientError::Network(_) => "Network error. Please try again.".to_string(),
            ClientError::IncompleteResponse(msg) => msg.clone(),
        }
    }

    /// True for failures raised before any request was issued.
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Network(format!("JSON parsing error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_local() {
        let err = ClientError::Validation("Claim number must be exactly 10 characters.".into());
        assert!(err.is_local());
        assert_eq!(
            err.user_message(),
            "Claim number must be exactly 10 characters."
        );
    }

    #[test]
    fn test_network_user_message_is_generic() {
        let err = ClientError::Network("connection refused".into());
        assert!(!err.is_local());
        assert_eq!(err.user_message(), "Network error. Please try again.");
        // The diagnostic form keeps the transport detail.
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_rate_limited_carries_retry_after() {
        let err = ClientError::RateLimited {
            retry_after_secs: 42,
        };
        assert!(err.to_string().contains("42"));
        assert_eq!(
            err.user_message(),
            "Please wait a moment before sending again."
        );
    }

    #[test]
    fn test_server_message_passes_through() {
        let err = ClientError::Server("Something went wrong.".into());
        assert_eq!(err.user_message(), "Something went wrong.");
    }
}
