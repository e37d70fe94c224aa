use thiserror::Error;

use crate::column::ColumnType;
use crate::grid::DType;

/// Error type definitions
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error")]
    Io(#[source] std::io::Error),

    #[error("Index out of bounds: index {index}, size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("Dimension mismatch: expected {expected} indices, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Row label not found: {0}")]
    LabelNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumnName(String),

    #[error("Duplicate row label: {0}")]
    DuplicateLabel(String),

    #[error("Length mismatch: expected {expected}, actual {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch: shape {shape:?} holds {expected} elements, buffer has {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    #[error("Column type mismatch: column {name}, expected {expected:?}, found {found:?}")]
    ColumnTypeMismatch {
        name: String,
        expected: ColumnType,
        found: ColumnType,
    },

    #[error("Missing value cannot be stored in {0:?} grid")]
    MissingInIntegerGrid(DType),

    #[error("Cast error: {0}")]
    Cast(String),

    #[error("Type error: {0}")]
    Type(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of errors, for callers that only care about the
/// failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Positional access outside the valid range
    Index,
    /// Unknown column name or row label
    Key,
    /// Length, shape, naming or cast problems
    Value,
    /// Operation not defined for the element type
    Type,
    /// Invalid configuration
    Configuration,
    /// Underlying IO failure
    Io,
}

impl Error {
    /// Returns the family this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexOutOfBounds { .. } | Error::DimensionMismatch { .. } => ErrorKind::Index,
            Error::ColumnNotFound(_) | Error::LabelNotFound(_) => ErrorKind::Key,
            Error::DuplicateColumnName(_)
            | Error::DuplicateLabel(_)
            | Error::LengthMismatch { .. }
            | Error::ShapeMismatch { .. }
            | Error::Cast(_)
            | Error::InvalidValue(_)
            | Error::InvalidOperation(_)
            | Error::Geometry(_) => ErrorKind::Value,
            Error::ColumnTypeMismatch { .. } | Error::MissingInIntegerGrid(_) | Error::Type(_) => {
                ErrorKind::Type
            }
            Error::ConfigurationError(_) => ErrorKind::Configuration,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}
