use std::fmt;

/// The Error Type for all fallible `SparseMatrix` operations
#[derive(Debug)]
pub enum MatrixError {
    /// A row or column index fell outside the matrix. Indices are kept as
    /// `i64` so that negative coordinates parsed from a matrix file can be
    /// reported as-is.
    IndexOutOfBounds {
        row: i64,
        col: i64,
        num_rows: usize,
        num_cols: usize,
    },
    /// Operand shapes differ in an elementwise operation
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
    /// Inner dimensions differ in a multiplication
    IncompatibleDimensions { lhs_cols: usize, rhs_rows: usize },
    /// The mandatory header of a matrix file is absent or malformed
    InvalidFormat(String),
    /// The underlying file could not be opened, read, or written
    ResourceUnavailable(String),
}

impl std::error::Error for MatrixError {}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds {
                row,
                col,
                num_rows,
                num_cols,
            } => write!(
                f,
                "Index ({}, {}) is outside the {}x{} matrix; Cannot access element!",
                row, col, num_rows, num_cols
            ),
            Self::DimensionMismatch { lhs, rhs } => write!(
                f,
                "Matrix dimensions {}x{} and {}x{} do not match; Cannot apply elementwise operation!",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            Self::IncompatibleDimensions { lhs_cols, rhs_rows } => write!(
                f,
                "Inner dimensions {} and {} are incompatible; Cannot multiply matrices!",
                lhs_cols, rhs_rows
            ),
            Self::InvalidFormat(reason) => {
                write!(f, "Invalid matrix file format: {}!", reason)
            }
            Self::ResourceUnavailable(reason) => {
                write!(f, "Matrix file unavailable: {}!", reason)
            }
        }
    }
}
