use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::{ChatClient, OpenAiClient, OpenAiConfig, SendChatMessageUseCase};

/// Values given on the command line. Each `Some` overrides the environment.
#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl ContainerConfig {
    /// Layer the command-line values over an environment-derived config.
    pub fn apply_to(&self, mut openai: OpenAiConfig) -> OpenAiConfig {
        if let Some(base_url) = &self.base_url {
            openai = openai.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            openai = openai.with_model(model);
        }
        if let Some(timeout) = self.timeout {
            openai = openai.with_timeout(timeout);
        }
        openai
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        Self::with_openai_config(config.apply_to(OpenAiConfig::from_env()))
    }

    pub fn with_openai_config(openai: OpenAiConfig) -> Result<Self> {
        debug!("Using chat endpoint {} with model {}", openai.endpoint(), openai.model);
        let client = OpenAiClient::new(openai)?;
        Ok(Self::with_chat_client(Arc::new(client)))
    }

    pub fn with_chat_client(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn chat_use_case(&self) -> SendChatMessageUseCase {
        SendChatMessageUseCase::new(self.chat_client.clone())
    }

    pub fn model_name(&self) -> &str {
        self.chat_client.model_name()
    }
}
