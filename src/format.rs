use crate::error::MatrixError;
use crate::matrix::SparseMatrix;

use std::fmt;
use std::fs::{read_to_string, File};
use std::io::{BufWriter, Write};

impl SparseMatrix {
    /// Parse a matrix from its plain-text representation
    ///
    /// The two header lines (`rows=N`, `cols=N`) are mandatory, in that
    /// order; anything else fails with [`MatrixError::InvalidFormat`]. Every
    /// following line is matched against the entry grammar
    /// `(<row>, <col>, <value>)` — with optional spaces after the commas and
    /// around the closing parenthesis — and applied through
    /// [`set`](Self::set), so decoding inherits its bounds checking and
    /// zero-collapsing. Lines that do not match the entry grammar are
    /// skipped, not rejected.
    pub fn from_text(text: &str) -> Result<Self, MatrixError> {
        let mut lines = text.lines();
        let num_rows = parse_header_line(lines.next(), "rows=")?;
        let num_cols = parse_header_line(lines.next(), "cols=")?;

        let mut sm = Self::new(num_rows, num_cols);
        for line in lines {
            if let Some((row, col, value)) = parse_entry_line(line) {
                if row < 0 || col < 0 {
                    return Err(MatrixError::IndexOutOfBounds {
                        row,
                        col,
                        num_rows,
                        num_cols,
                    });
                }
                sm.set(row as usize, col as usize, value)?;
            }
        }
        Ok(sm)
    }

    /// Render the matrix in its plain-text representation: the two header
    /// lines followed by one `(row, col, value)` line per stored entry in
    /// row-major order
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Read and parse a matrix file
    pub fn from_file(path: impl AsRef<str>) -> Result<Self, MatrixError> {
        let contents = read_to_string(path.as_ref()).map_err(|err| {
            MatrixError::ResourceUnavailable(format!("{}: {}", path.as_ref(), err))
        })?;
        Self::from_text(&contents)
    }

    /// Write the matrix to a file in the plain-text format
    pub fn save_to_file(&self, path: impl AsRef<str>) -> Result<(), MatrixError> {
        let file = File::create(path.as_ref()).map_err(|err| {
            MatrixError::ResourceUnavailable(format!("{}: {}", path.as_ref(), err))
        })?;

        let mut writer = BufWriter::new(file);
        writer.write_all(self.to_string().as_bytes()).map_err(|err| {
            MatrixError::ResourceUnavailable(format!("{}: {}", path.as_ref(), err))
        })
    }
}

impl fmt::Display for SparseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "rows={}", self.num_rows())?;
        writeln!(f, "cols={}", self.num_cols())?;

        for (row, col, value) in self.iter() {
            writeln!(f, "({}, {}, {})", row, col, value)?;
        }
        Ok(())
    }
}

fn parse_header_line(line: Option<&str>, prefix: &str) -> Result<usize, MatrixError> {
    let line = line.ok_or_else(|| {
        MatrixError::InvalidFormat(format!("missing '{}' header line", prefix))
    })?;
    let payload = line.strip_prefix(prefix).ok_or_else(|| {
        MatrixError::InvalidFormat(format!("expected '{}' header line, found '{}'", prefix, line))
    })?;

    let dimension: i64 = payload.trim_end().parse().map_err(|_| {
        MatrixError::InvalidFormat(format!("'{}' header is not an integer", prefix))
    })?;
    if dimension < 0 {
        return Err(MatrixError::InvalidFormat(format!(
            "'{}' header is negative",
            prefix
        )));
    }
    Ok(dimension as usize)
}

/// Match one line against the entry grammar, returning `None` on any
/// mismatch (the caller skips such lines)
fn parse_entry_line(line: &str) -> Option<(i64, i64, i64)> {
    let bytes = line.as_bytes();
    let mut pos = 0;

    expect_byte(bytes, &mut pos, b'(')?;
    let row = scan_integer(bytes, &mut pos)?;
    expect_byte(bytes, &mut pos, b',')?;
    skip_spaces(bytes, &mut pos);
    let col = scan_integer(bytes, &mut pos)?;
    expect_byte(bytes, &mut pos, b',')?;
    skip_spaces(bytes, &mut pos);
    let value = scan_integer(bytes, &mut pos)?;
    skip_spaces(bytes, &mut pos);
    expect_byte(bytes, &mut pos, b')')?;
    skip_spaces(bytes, &mut pos);

    (pos == bytes.len()).then(|| (row, col, value))
}

/// An optional `-` followed by at least one decimal digit
fn scan_integer(bytes: &[u8], pos: &mut usize) -> Option<i64> {
    let mut sign = 1;
    if bytes.get(*pos) == Some(&b'-') {
        sign = -1;
        *pos += 1;
    }

    let digits_start = *pos;
    let mut value: i64 = 0;
    while let Some(digit) = bytes.get(*pos).filter(|b| b.is_ascii_digit()) {
        // overflowing integers fail the grammar rather than wrapping
        value = value
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
        *pos += 1;
    }

    (*pos > digits_start).then(|| sign * value)
}

fn expect_byte(bytes: &[u8], pos: &mut usize, expected: u8) -> Option<()> {
    if bytes.get(*pos) == Some(&expected) {
        *pos += 1;
        Some(())
    } else {
        None
    }
}

fn skip_spaces(bytes: &[u8], pos: &mut usize) {
    while matches!(bytes.get(*pos), Some(b' ' | b'\t' | b'\r')) {
        *pos += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> SparseMatrix {
        let mut sm = SparseMatrix::new(3, 4);
        sm.set(0, 0, 1).unwrap();
        sm.set(0, 3, -2).unwrap();
        sm.set(2, 1, 40).unwrap();
        sm
    }

    #[test]
    fn encode_layout() {
        let text = sample_matrix().to_text();

        assert_eq!(text, "rows=3\ncols=4\n(0, 0, 1)\n(0, 3, -2)\n(2, 1, 40)\n");
    }

    #[test]
    fn round_trip() {
        let sm = sample_matrix();

        assert_eq!(SparseMatrix::from_text(&sm.to_text()).unwrap(), sm);
    }

    #[test]
    fn round_trip_empty_matrix() {
        let sm = SparseMatrix::new(5, 7);
        let restored = SparseMatrix::from_text(&sm.to_text()).unwrap();

        assert_eq!(restored, sm);
        assert_eq!(restored.num_entries(), 0);
    }

    #[test]
    fn missing_or_malformed_header() {
        assert!(matches!(
            SparseMatrix::from_text(""),
            Err(MatrixError::InvalidFormat(_))
        ));
        assert!(matches!(
            SparseMatrix::from_text("rows=3\n"),
            Err(MatrixError::InvalidFormat(_))
        ));
        assert!(matches!(
            SparseMatrix::from_text("cols=4\nrows=3\n"),
            Err(MatrixError::InvalidFormat(_))
        ));
        assert!(matches!(
            SparseMatrix::from_text("rows=many\ncols=4\n"),
            Err(MatrixError::InvalidFormat(_))
        ));
        assert!(matches!(
            SparseMatrix::from_text("rows=-1\ncols=4\n"),
            Err(MatrixError::InvalidFormat(_))
        ));
    }

    #[test]
    fn malformed_entry_lines_are_skipped() {
        let text = "rows=2\ncols=2\n(0, 0, 1)\ngarbage text\n(1, 1)\n(1, 1, 2)\n";
        let sm = SparseMatrix::from_text(text).unwrap();

        assert_eq!(sm.get(0, 0).unwrap(), 1);
        assert_eq!(sm.get(1, 1).unwrap(), 2);
        assert_eq!(sm.num_entries(), 2);
    }

    #[test]
    fn entry_whitespace_tolerance() {
        let text = "rows=2\ncols=2\n(0,0,3)\n(1,  1,\t-4 )  \n";
        let sm = SparseMatrix::from_text(text).unwrap();

        assert_eq!(sm.get(0, 0).unwrap(), 3);
        assert_eq!(sm.get(1, 1).unwrap(), -4);
    }

    #[test]
    fn entry_with_trailing_junk_is_skipped() {
        let text = "rows=2\ncols=2\n(0, 0, 3) extra\n";
        let sm = SparseMatrix::from_text(text).unwrap();

        assert_eq!(sm.num_entries(), 0);
    }

    #[test]
    fn zero_valued_entry_is_accepted_but_not_stored() {
        let text = "rows=2\ncols=2\n(0, 1, 0)\n";
        let sm = SparseMatrix::from_text(text).unwrap();

        assert_eq!(sm.num_entries(), 0);
        assert_eq!(sm.get(0, 1).unwrap(), 0);
    }

    #[test]
    fn entry_outside_declared_dimensions() {
        assert!(matches!(
            SparseMatrix::from_text("rows=2\ncols=2\n(2, 0, 1)\n"),
            Err(MatrixError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            SparseMatrix::from_text("rows=2\ncols=2\n(-1, 0, 1)\n"),
            Err(MatrixError::IndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir().join("sparse_matrix_file_round_trip.txt");
        let path = path.to_str().unwrap();

        let sm = sample_matrix();
        sm.save_to_file(path).unwrap();

        assert_eq!(SparseMatrix::from_file(path).unwrap(), sm);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            SparseMatrix::from_file("./definitely/not/a/real/path.txt"),
            Err(MatrixError::ResourceUnavailable(_))
        ));
    }
}
