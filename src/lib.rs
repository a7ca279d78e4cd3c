//! Mutation Browser - look up somatic variants by gene symbol.
//!
//! This library provides the pieces behind the search window: the variant
//! API client, the search state machine, the render plan and the egui views.

pub mod api;
pub mod config;
pub mod search;
pub mod ui;

use thiserror::Error;

/// Error types covering every failure mode of the browser.
#[derive(Error, Debug)]
pub enum MutationBrowserError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status code
    #[error("HTTP status {0}")]
    HttpStatus(u16),

    /// The response body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors (config and log files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MutationBrowserError {
    /// Short label for the error kind, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            MutationBrowserError::Transport(_) => "transport",
            MutationBrowserError::HttpStatus(_) => "status",
            MutationBrowserError::Decode(_) => "decode",
            MutationBrowserError::Config(_) => "config",
            MutationBrowserError::Io(_) => "io",
        }
    }
}

/// Result type alias using MutationBrowserError
pub type Result<T> = std::result::Result<T, MutationBrowserError>;
