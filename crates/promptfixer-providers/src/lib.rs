//! promptfixer-providers — Prompt backend integrations.
//!
//! Implements the `PromptBackend` trait for the PromptFixer HTTP API and a
//! scripted in-memory backend, and loads the configuration that selects
//! between them.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{create_backend, load_config, BackendConfig, PromptFixerConfig};
pub use promptfixer_core::error::BackendError;
