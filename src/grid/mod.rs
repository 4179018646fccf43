// Logical grid addressing: cell points, grid dimensions, and A1-style position labels.

pub mod coords;

use std::fmt;

/// A logical cell address. Rows and columns are zero-based and independent of zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
    pub row: usize,
    pub col: usize,
}

impl GridPoint {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position label as shown in the grid headers: row letters, then 1-based column.
    ///
    /// `(0, 0)` is `A1`, `(1, 1)` is `B2`, `(26, 9)` is `AA10`.
    pub fn label(&self) -> String {
        format!("{}{}", row_letters(self.row), self.col + 1)
    }

    /// Parse an A1-style label back into a point.
    pub fn from_label(label: &str) -> Result<Self, LabelError> {
        let label = label.trim();
        let split = label
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| LabelError::MissingColumn(label.to_string()))?;
        let (letters, digits) = label.split_at(split);
        if letters.is_empty() {
            return Err(LabelError::MissingRow(label.to_string()));
        }

        let mut row = 0usize;
        for ch in letters.chars() {
            let value = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
            row = row
                .checked_mul(26)
                .and_then(|r| r.checked_add(value))
                .ok_or_else(|| LabelError::OutOfRange(label.to_string()))?;
        }

        let col: usize = digits
            .parse()
            .map_err(|_| LabelError::InvalidColumn(label.to_string()))?;
        if col == 0 {
            return Err(LabelError::InvalidColumn(label.to_string()));
        }

        Ok(Self::new(row - 1, col - 1))
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Bijective base-26 row letters: A..Z, AA..AZ, BA..
fn row_letters(row: usize) -> String {
    let mut n = row + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Errors from parsing a position label.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("label '{0}' has no row letters")]
    MissingRow(String),
    #[error("label '{0}' has no column number")]
    MissingColumn(String),
    #[error("label '{0}' has an invalid column number")]
    InvalidColumn(String),
    #[error("label '{0}' is out of range")]
    OutOfRange(String),
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether a raw (possibly negative) cell index lies inside the grid.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Clamp a raw cell index to `[0, dimension - 1]` on both axes.
    pub fn clamp(&self, row: i64, col: i64) -> GridPoint {
        let max_row = self.rows.saturating_sub(1) as i64;
        let max_col = self.cols.saturating_sub(1) as i64;
        GridPoint::new(row.clamp(0, max_row) as usize, col.clamp(0, max_col) as usize)
    }
}
