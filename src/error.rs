//! Resolver error types

use thiserror::Error;

/// Error type for resolver, proxy, and storage backend operations
#[derive(Error, Debug)]
pub enum Error {
    /// Define called without overwrite on an existing key
    #[error("cannot define key '{0}': key already exists")]
    DuplicateKey(String),

    /// Get or save on a key that was never defined
    #[error("resource '{0}' not defined")]
    UndefinedResource(String),

    /// No storage backend accepted the location
    #[error("location '{0}' is not supported: no storage backend accepts it")]
    UnsupportedProtocol(String),

    /// Write payload that is neither a string nor a text stream.
    ///
    /// Reserved: [`crate::WriteData`] makes this unrepresentable at the type
    /// level, but the variant remains part of the public error surface.
    #[error("cannot write payload: only strings and text streams are supported")]
    UnsupportedWriteType,

    /// Get called with an unrecognized format selector
    #[error("invalid format '{0}' requested from get; format must be one of [str, buffer, file_handle]")]
    UnsupportedGetAsFormat(String),

    /// Write attempted through a read-only proxy
    #[error("attempted to write to read-only resource at {0}")]
    ReadOnly(String),

    /// Malformed URL. Reserved for stricter URL validation.
    #[error("url '{0}' is not valid")]
    InvalidUrl(String),

    /// IO error from the underlying filesystem, propagated unwrapped
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error from the tabular helpers
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;
