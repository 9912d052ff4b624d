//! Error types for pattern generation and request handling

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pattern generation operations
#[derive(Debug)]
pub enum PatternError {
    /// A required input value is absent, non-finite or otherwise malformed
    InvalidInput {
        /// Name of the offending input field
        field: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is unusable
        reason: String,
    },

    /// Gauge densities must be finite and strictly positive
    ///
    /// Every piece depends on the gauge, so this rejects the whole request
    /// rather than a single piece.
    InvalidGauge {
        /// Stitches per 10 cm as supplied
        stitches_per_10cm: f64,
        /// Rows per 10 cm as supplied
        rows_per_10cm: f64,
    },

    /// A single piece could not be generated
    PieceGeneration {
        /// Display name of the piece
        piece: String,
        /// Description of the failure
        reason: String,
    },

    /// Failed to parse a pattern request
    Parse {
        /// Path of the request file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to serialize a generated pattern
    Serialize {
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid input '{field}' = '{value}': {reason}")
            }
            Self::InvalidGauge {
                stitches_per_10cm,
                rows_per_10cm,
            } => {
                write!(
                    f,
                    "Invalid gauge {stitches_per_10cm} sts x {rows_per_10cm} rows per 10 cm: both densities must be positive"
                )
            }
            Self::PieceGeneration { piece, reason } => {
                write!(f, "Could not generate piece '{piece}': {reason}")
            }
            Self::Parse { path, source } => {
                write!(
                    f,
                    "Failed to parse pattern request '{}': {source}",
                    path.display()
                )
            }
            Self::Serialize { source } => {
                write!(f, "Failed to serialize pattern: {source}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } | Self::Serialize { source } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pattern generation results
pub type Result<T> = std::result::Result<T, PatternError>;

impl From<std::io::Error> for PatternError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for PatternError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize { source: err }
    }
}

/// Create an invalid input error
pub fn invalid_input(
    field: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PatternError {
    PatternError::InvalidInput {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a piece generation error
pub fn piece_error(piece: &impl ToString, reason: &impl ToString) -> PatternError {
    PatternError::PieceGeneration {
        piece: piece.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to a bare I/O error
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> PatternError {
    PatternError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
