//! # Application Layer
//!
//! Use cases and the interfaces they depend on. Connectors implement the
//! interfaces; the API layer drives the use cases.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
