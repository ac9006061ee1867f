//! # Domain Layer
//!
//! Request and response models for the chat-completions API, and the error
//! taxonomy every other layer reports through.
//! This layer is independent of the HTTP client and the CLI.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
