//! Sparse integer matrix arithmetic with a plain-text storage format
//!
//! A [`SparseMatrix`] stores only its non-zero elements as per-row sequences
//! of `(column, value)` pairs sorted by ascending column. It supports element
//! access and mutation, addition, subtraction, and multiplication, and a
//! line-oriented text format for reading and writing matrices:
//!
//! ```text
//! rows=3
//! cols=4
//! (0, 0, 1)
//! (0, 3, -2)
//! (2, 1, 40)
//! ```
//!
//! ```rust
//! use sparse_matrix::SparseMatrix;
//!
//! # fn main() -> Result<(), sparse_matrix::MatrixError> {
//! let mut a = SparseMatrix::new(2, 2);
//! a.set(0, 0, 1)?;
//! a.set(0, 1, 2)?;
//!
//! let product = a.multiply(&SparseMatrix::identity(2))?;
//! assert_eq!(product.get(0, 1)?, 2);
//! # Ok(())
//! # }
//! ```

/// The Error Type for all fallible matrix operations
pub mod error;
/// Plain-text encoding/decoding and matrix file I/O
pub mod format;
/// Sparse storage, element access, and the arithmetic operations
pub mod matrix;

pub use error::MatrixError;
pub use matrix::SparseMatrix;
