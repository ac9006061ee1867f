use thiserror::Error;

use super::models::ApiErrorDetail;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("API Error: {}", .0.message)]
    RemoteApiError(ApiErrorDetail),

    #[error("API returned HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl DomainError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::ConfigurationError(_))
    }

    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::DecodeError(_))
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::TransportError(_))
    }

    /// The structured error the remote service reported, if any.
    pub fn remote_detail(&self) -> Option<&ApiErrorDetail> {
        match self {
            Self::RemoteApiError(detail) => Some(detail),
            _ => None,
        }
    }

    /// Whether the same request could succeed if the caller sent it again.
    ///
    /// Nothing in this crate retries; the flag is informational.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::TransportError(_) => true,
            Self::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
