//! Error types for `lcf`.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

use crate::handlers::HandlerError;
use crate::sprintf::FormatError;

/// Errors that can occur in `lcf`.
///
/// The binary maps [`Config`](Self::Config) and [`Toml`](Self::Toml) to
/// exit 1, everything else to exit 2.
#[derive(Debug, Error)]
pub enum LcfError {
    /// Configuration error (invalid flag combination, unreadable config file).
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error during read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A handler failed while resolving an attribute; nothing was rendered.
    #[error("attribute {attribute:?} failed: {source}")]
    Handler {
        attribute: String,
        #[source]
        source: HandlerError,
    },

    /// The compiled template could not be filled with the resolved values.
    #[error("format error: {0}")]
    Format(#[from] FormatError),
}
