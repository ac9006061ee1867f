use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a single user message to a chat-completion API and
/// receiving the reply text.
///
/// Implementors encapsulate transport, credentials, serialization, and
/// vendor-specific API details. Consumers (e.g. [`crate::SendChatMessageUseCase`])
/// stay decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send `message` as the only `user` turn and return the content of the
    /// first choice, or an empty string when the service returned none.
    async fn complete(&self, message: &str) -> Result<String, DomainError>;

    /// Model identifier requests are sent with (for logging purposes).
    fn model_name(&self) -> &str;
}
