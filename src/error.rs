//! Error type of the conversion.

use thiserror::Error;

/// Result type alias using [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a conversion.  Malformed colors are *not* errors: they
/// degrade to opaque black (see [`crate::parse_color`]).
#[derive(Debug, Error)]
pub enum Error {
    /// `colormap.paint.fill-color.stops` is missing, empty, or not a
    /// list of `[number, string]` pairs.
    #[error("Invalid colormap format in metadata")]
    InvalidFormat,

    #[error("Missing short_name in metadata")]
    MissingShortName,

    /// `short_name` names the output file and must be a plain file name.
    #[error("Invalid short_name in metadata: {0:?}")]
    InvalidShortName(String),

    #[error("Invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
