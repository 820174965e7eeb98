//! Error type shared by the band-merge crates.
//!
//! [`BandMergeError`] covers the failure modes of loading, matching and
//! writing catalogs. Every operation is all-or-nothing: an error aborts the
//! whole computation and no partial output is produced.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Configuration`](BandMergeError::Configuration) | Non-positive radius, empty union input, unknown band, invalid `Catalog::from_positions` pairs |
//! | [`Parse`](BandMergeError::Parse) | Loader: short rows, unparsable or non-finite values, mixed sentinel pairs |
//! | [`Io`](BandMergeError::Io) | Loader and writer file access |
//! | [`Serialization`](BandMergeError::Serialization) | JSON writer |
//!
//! ```
//! use bandmerge_core::{BandMergeError, Radius};
//!
//! let err = Radius::new(0.0).unwrap_err();
//! assert!(matches!(err, BandMergeError::Configuration { .. }));
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BandMergeError {
    /// An invalid parameter was supplied before any work started.
    #[error("Configuration error ({parameter}): {message}")]
    Configuration { parameter: String, message: String },

    /// A catalog row could not be turned into a source record.
    #[error("Parse error in {source_name} line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BandMergeResult<T> = Result<T, BandMergeError>;

impl BandMergeError {
    /// Creates a [`Configuration`](Self::Configuration) error.
    pub fn configuration(parameter: &str, reason: &str) -> Self {
        Self::Configuration {
            parameter: parameter.to_string(),
            message: reason.to_string(),
        }
    }

    /// Creates a [`Parse`](Self::Parse) error. `line` is 1-based.
    pub fn parse(source_name: &str, line: usize, reason: &str) -> Self {
        Self::Parse {
            source_name: source_name.to_string(),
            line,
            message: reason.to_string(),
        }
    }
}
