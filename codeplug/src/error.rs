//! Error types for the codeplug library.
//!
//! The pipeline stages themselves never fail: soft-data anomalies are
//! skipped or defaulted and reported through `log`. The variants below cover
//! the fatal cases that callers must handle, plus wrapped I/O and codec
//! failures from the thin collaborators around the pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a codeplug error.
///
/// # Examples
///
/// ```
/// use codeplug::{Error, Result};
///
/// fn no_channels() -> Result<String> {
///     Err(Error::NoChannels)
/// }
///
/// assert!(no_channels().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the codeplug library.
#[derive(Debug, Error)]
pub enum Error {
    /// Rendering was requested without a single channel row.
    #[error("channel table has no channels")]
    NoChannels,

    /// A numeric column in a raw table could not be parsed.
    #[error("invalid number in '{field}': {value:?}")]
    InvalidNumber {
        /// The column or field that held the value.
        field: String,
        /// The raw text that failed to parse.
        value: String,
    },

    /// The requested radio ID is not present in the users table.
    #[error(
        "radio ID {radio_id} was not found in {}. Regenerate the users file with \
         `codeplug fetch-users` or pass --users-csv with the correct file",
        path.display()
    )]
    RadioUserNotFound {
        /// The radio ID that was looked up.
        radio_id: u32,
        /// The users table that was searched.
        path: PathBuf,
    },

    /// The flashing binary could not be found on `PATH`.
    #[error("could not find '{name}' on PATH. Install dmrconfig first")]
    BinaryNotFound {
        /// The binary name that was searched for.
        name: String,
    },

    /// A CSV encoding or decoding error occurred.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON decoding error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error describes malformed or missing input data.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeplug::Error;
    ///
    /// assert!(Error::NoChannels.is_input_error());
    /// ```
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::NoChannels | Self::InvalidNumber { .. })
    }

    /// Check if the error is a failed identity lookup.
    #[must_use]
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::RadioUserNotFound { .. })
    }

    /// Shorthand for building an [`Error::InvalidNumber`].
    pub(crate) fn invalid_number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
