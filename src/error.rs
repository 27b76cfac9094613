//! Error types for rule induction.

use thiserror::Error;

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the rule induction pipeline.
///
/// All variants are contract violations in the sense of the error taxonomy:
/// they are raised eagerly and never leave partial state behind. Degenerate
/// outcomes (empty terms, classes without surviving terms, label ties) are
/// not errors and are resolved deterministically instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("classifier has not been fitted yet")]
    NotFitted,

    #[error("cannot fit on an empty dataset")]
    EmptyDataset,

    #[error("label column has {labels} entries but the matrix has {rows} rows")]
    LabelLength { labels: usize, rows: usize },

    #[error("column {name:?} has {actual} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("matrix has no column named {0:?}")]
    UnknownColumn(String),

    #[error("no semantics entry for literal {0:?}")]
    UnknownLiteral(String),

    #[error("duplicate column name {0:?}")]
    DuplicateColumn(String),

    #[error("row {row} is out of range for a matrix with {rows} rows")]
    RowOutOfRange { row: usize, rows: usize },

    #[error("terms passed to the minimizer have mismatched literal shapes")]
    ShapeMismatch,
}
