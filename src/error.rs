//! Crate-wide error type.
//!
//! Every reader and validator reports a distinguishable error kind instead of
//! terminating the process; only the binaries turn these into an exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by geometry readers, validators and the boundary pipeline.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Failed to open or read an input file.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed file contents (header, resolution line, data rows, units).
    #[error("{}: {message}", path.display())]
    Format { path: PathBuf, message: String },

    /// Two grids that must share dimensions do not.
    #[error("{context}: image size mismatch ({expected:?} vs {actual:?})")]
    ShapeMismatch {
        context: &'static str,
        /// (width, height) of the reference grid
        expected: (usize, usize),
        /// (width, height) of the offending grid
        actual: (usize, usize),
    },

    /// A tunable violates its precondition (patch size parity, range).
    #[error("{0}")]
    InvalidParameter(String),
}

impl GeometryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}
