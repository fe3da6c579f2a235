//! Error types for conversion and discovery.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The converter program could not be started at all.
    #[error("converter '{program}' is not installed or not reachable")]
    ToolUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter ran but rejected this document.
    #[error("conversion of '{input}' failed: {message}")]
    Failed { input: PathBuf, message: String },

    /// The converter reported success without producing a PDF.
    #[error("conversion of '{input}' finished but produced no output")]
    MissingOutput { input: PathBuf },

    #[error("I/O error during conversion: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn failed(input: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Failed {
            input: input.into(),
            message: message.into(),
        }
    }

    /// True when the environment, not the document, is at fault.
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::ToolUnavailable { .. })
    }
}

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("live document discovery is not available on this platform")]
    Unsupported,

    #[error("the word processor is not running; open a document first")]
    NotRunning,

    #[error("the word processor is running, but no document is open")]
    NoDocumentOpen,

    #[error("could not query the word processor: {0}")]
    Failed(String),
}
