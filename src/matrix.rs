use crate::error::MatrixError;

use nalgebra::DMatrix;
use smallvec::SmallVec;

/// The expected number of non-zero entries per row. This determines the stack
/// allocation size of each row's `SmallVec`; denser rows spill to the heap.
pub const EXPECTED_ROW_DENSITY: usize = 8;

/// One stored (non-zero) element of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    col: usize,
    value: i64,
}

/// A sparse integer matrix storing only its non-zero elements
///
/// Each row is an ordered sequence of `(column, value)` pairs sorted by
/// ascending column. Absence of an entry means the element is zero, and a
/// zero value is never stored: writing a zero through [`set`](Self::set)
/// removes the entry instead. All arithmetic operations read their operands
/// immutably and construct a fresh result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    num_rows: usize,
    num_cols: usize,
    rows: Vec<SmallVec<[Entry; EXPECTED_ROW_DENSITY]>>,
}

impl SparseMatrix {
    /// Construct an empty matrix of the given dimensions
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            rows: vec![SmallVec::new(); num_rows],
        }
    }

    /// Construct a square matrix with 1s on the diagonal
    pub fn identity(size: usize) -> Self {
        Self {
            num_rows: size,
            num_cols: size,
            rows: (0..size)
                .map(|i| {
                    let mut row = SmallVec::new();
                    row.push(Entry { col: i, value: 1 });
                    row
                })
                .collect(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Total number of stored (non-zero) entries
    pub fn num_entries(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }

    /// Retrieve the element at `(row, col)`
    ///
    /// Returns 0 for any in-bounds position with no stored entry; absence is
    /// a valid, common case rather than a failure.
    pub fn get(&self, row: usize, col: usize) -> Result<i64, MatrixError> {
        self.check_bounds(row, col)?;

        Ok(self.rows[row]
            .iter()
            .find(|entry| entry.col == col)
            .map_or(0, |entry| entry.value))
    }

    /// Write the element at `(row, col)`
    ///
    /// A zero value removes any existing entry at that position; a non-zero
    /// value overwrites the existing entry or is inserted at the position
    /// that keeps the row sorted by column. Row length changes by at most
    /// one.
    pub fn set(&mut self, row: usize, col: usize, value: i64) -> Result<(), MatrixError> {
        self.check_bounds(row, col)?;
        let entries = &mut self.rows[row];

        if value == 0 {
            if let Some(idx) = entries.iter().position(|entry| entry.col == col) {
                entries.remove(idx);
            }
            return Ok(());
        }

        match entries.iter().position(|entry| entry.col >= col) {
            Some(idx) if entries[idx].col == col => entries[idx].value = value,
            Some(idx) => entries.insert(idx, Entry { col, value }),
            None => entries.push(Entry { col, value }),
        }
        Ok(())
    }

    /// Iterate over the stored entries as `(row, col, value)` in row-major
    /// order (rows ascending; columns ascending within a row)
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, entries)| {
            entries.iter().map(move |entry| (row, entry.col, entry.value))
        })
    }

    /// Elementwise sum with a matrix of the same shape
    pub fn add(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        let mut result = Self::new(self.num_rows, self.num_cols);

        for row in 0..self.num_rows {
            for entry in self.rows[row].iter() {
                result.set(row, entry.col, entry.value + other.get(row, entry.col)?)?;
            }
            for entry in other.rows[row].iter() {
                result.set(row, entry.col, self.get(row, entry.col)? + entry.value)?;
            }
        }

        Ok(result)
    }

    /// Elementwise difference with a matrix of the same shape
    pub fn subtract(&self, other: &Self) -> Result<Self, MatrixError> {
        self.check_same_shape(other)?;
        let mut result = Self::new(self.num_rows, self.num_cols);

        for row in 0..self.num_rows {
            for entry in self.rows[row].iter() {
                result.set(row, entry.col, entry.value - other.get(row, entry.col)?)?;
            }
            // second pass must keep this operand on the left of the minus
            for entry in other.rows[row].iter() {
                result.set(row, entry.col, self.get(row, entry.col)? - entry.value)?;
            }
        }

        Ok(result)
    }

    /// Matrix product; requires `self.num_cols == other.num_rows`
    ///
    /// Each product of stored entries is accumulated into the result through
    /// [`get`](Self::get)/[`set`](Self::set), so the result inherits the
    /// sorted, zero-free row invariant. Cost scales with the density of both
    /// operands along the shared dimension.
    pub fn multiply(&self, other: &Self) -> Result<Self, MatrixError> {
        if self.num_cols != other.num_rows {
            return Err(MatrixError::IncompatibleDimensions {
                lhs_cols: self.num_cols,
                rhs_rows: other.num_rows,
            });
        }
        let mut result = Self::new(self.num_rows, other.num_cols);

        for row in 0..self.num_rows {
            for lhs in self.rows[row].iter() {
                for rhs in other.rows[lhs.col].iter() {
                    let sum = result.get(row, rhs.col)? + lhs.value * rhs.value;
                    result.set(row, rhs.col, sum)?;
                }
            }
        }

        Ok(result)
    }

    /// Produce a Json Object that describes this matrix
    #[cfg(feature = "json_export")]
    pub fn to_json(&self) -> json::JsonValue {
        json::object! {
            "rows": self.num_rows,
            "cols": self.num_cols,
            "entries": json::JsonValue::from(
                self.iter()
                    .map(|(row, col, value)| json::array![row, col, value])
                    .collect::<Vec<_>>()
            )
        }
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.num_rows || col >= self.num_cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: row as i64,
                col: col as i64,
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            });
        }
        Ok(())
    }

    fn check_same_shape(&self, other: &Self) -> Result<(), MatrixError> {
        if self.num_rows != other.num_rows || self.num_cols != other.num_cols {
            return Err(MatrixError::DimensionMismatch {
                lhs: (self.num_rows, self.num_cols),
                rhs: (other.num_rows, other.num_cols),
            });
        }
        Ok(())
    }
}

impl From<&SparseMatrix> for DMatrix<i64> {
    fn from(sm: &SparseMatrix) -> Self {
        let mut dense = DMatrix::zeros(sm.num_rows, sm.num_cols);

        for (row, col, value) in sm.iter() {
            dense[(row, col)] = value;
        }

        dense
    }
}
