//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Chat completion over HTTP (OpenAI-compatible servers)
//! - The API layer that wires connectors to use cases for the CLI

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
