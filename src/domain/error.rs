//! Error types for the Cinedex plugin.
//!
//! This module defines the centralized error type [`CinedexError`] and a type alias
//! [`Result`] used throughout the crate. Variants are derived with `thiserror`.
//!
//! An empty catalog and a query without matches are *not* errors; they are
//! rendered as empty states by the view layer.

use thiserror::Error;

/// The main error type for Cinedex operations.
///
/// # Examples
///
/// ```
/// use cinedex::CinedexError;
///
/// fn read_catalog() -> Result<(), CinedexError> {
///     Err(CinedexError::Load("catalog.json: unexpected end of input".to_string()))
/// }
///
/// assert!(read_catalog().is_err());
/// ```
#[derive(Debug, Error)]
pub enum CinedexError {
    /// The catalog could not be fetched or parsed.
    ///
    /// Surfaces to the user as the blocking load-failed state. The string
    /// carries the underlying reason.
    #[error("Catalog load error: {0}")]
    Load(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Cinedex operations.
pub type Result<T> = std::result::Result<T, CinedexError>;
