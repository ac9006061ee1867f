pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ChatClient, SendChatMessageUseCase};

pub use cli::Commands;

pub use connector::{Container, ContainerConfig, OpenAiClient, OpenAiConfig, Router};

pub use domain::{
    ApiErrorDetail, ChatMessage, ChatRequest, ChatResponse, Choice, DomainError, Role,
    SamplingParams, DEFAULT_MODEL,
};
