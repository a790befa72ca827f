//! services/cli/src/error.rs
//!
//! Defines the primary error type for the command-line service.

use crate::config::ConfigError;
use commitly_core::StoreError;

/// The primary error type for the `commitly` service.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the persistence store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A saved file (such as a chat history) could not be read or written as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents a standard Input/Output error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The command needs a logged-in user.
    #[error("Not logged in. Run `commitly login <email>` first.")]
    NotLoggedIn,
}
