//! Defines [`GeoColumnError`], representing all errors returned by this crate.

use arrow_schema::ArrowError;
use thiserror::Error;

use crate::datatypes::GeometryType;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeoColumnError {
    /// The geometry type cannot be inferred from an empty sequence.
    #[error("cannot infer geometry type from an empty sequence")]
    EmptyInput,

    /// An element of the input sequence does not resolve to the geometry type inferred from the
    /// first element.
    #[error("geometry type mismatch at index {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: GeometryType,
        actual: &'static str,
        index: usize,
    },

    /// Offset arrays violate the invariants required for reconstruction.
    #[error("malformed offsets: {0}")]
    MalformedOffsets(String),

    /// An extension name that does not identify one of the supported geometry types.
    #[error("unknown geometry type tag: {0}")]
    UnknownTypeTag(String),

    /// Incorrect geometry type for operation
    #[error("Incorrect geometry type for operation: {0}")]
    IncorrectGeometryType(String),

    /// Whenever pushing to a container fails because it does not support more entries.
    #[error("Overflow: data does not fit in i32 offsets.")]
    Overflow,

    /// [ArrowError]
    #[error(transparent)]
    Arrow(#[from] ArrowError),

    /// [parquet::errors::ParquetError]
    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    /// [std::io::Error]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// General errors that do not fit into the other categories.
    #[error("General error: {0}")]
    General(String),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeoColumnError>;
