//! The error type shared by every column operation.

use thiserror::Error;

use crate::types::ColumnKind;

/// Convenience result type for column operations.
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Error type returned by column operations.
///
/// This is a single error enum shared by parsing, mutation, selection and reduction. A failed
/// operation never leaves a column partially mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColumnError {
    /// A value could not be parsed or coerced into the column's domain.
    #[error("failed to parse {raw:?} as {kind}: {message}")]
    Parse {
        kind: ColumnKind,
        raw: String,
        message: String,
    },

    /// A row index is outside `0..size`.
    #[error("row index {index} out of bounds for column '{column}' of size {size}")]
    IndexOutOfBounds {
        column: String,
        index: usize,
        size: usize,
    },

    /// A source column is too short for a row-aligned operation.
    #[error(
        "source column '{source_column}' has {actual} rows but column '{column}' needs at least {required}"
    )]
    SourceTooShort {
        column: String,
        source_column: String,
        required: usize,
        actual: usize,
    },

    /// A reduction exceeded the representable range of its result.
    #[error("{op} overflowed for column '{column}'")]
    Overflow { column: String, op: String },
}

impl ColumnError {
    /// Returns `true` for malformed textual or cross-type input.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Returns `true` for out-of-range rows and short source columns.
    pub fn is_index_error(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfBounds { .. } | Self::SourceTooShort { .. }
        )
    }

    pub(crate) fn parse(kind: ColumnKind, raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            raw: raw.into(),
            message: message.into(),
        }
    }
}
