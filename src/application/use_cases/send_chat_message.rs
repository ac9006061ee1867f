use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::application::ChatClient;
use crate::domain::DomainError;

/// Use case for sending one message and returning the reply text.
pub struct SendChatMessageUseCase {
    chat_client: Arc<dyn ChatClient>,
}

impl SendChatMessageUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub async fn execute(&self, message: &str) -> Result<String, DomainError> {
        if message.trim().is_empty() {
            return Err(DomainError::invalid_input("message must not be empty"));
        }

        debug!(
            "Sending {} byte message to model {}",
            message.len(),
            self.chat_client.model_name()
        );

        let start_time = Instant::now();
        let reply = self.chat_client.complete(message).await?;

        debug!(
            "Received {} byte reply in {:?}",
            reply.len(),
            start_time.elapsed()
        );

        Ok(reply)
    }
}
