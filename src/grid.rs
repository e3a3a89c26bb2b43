//! Rectangular grid of cell fills

use crate::color::Rgb;
use crate::error::{PixcelError, PixcelResult};

/// Largest row count an xlsx worksheet can hold
pub const MAX_ROWS: u32 = 1_048_576;
/// Largest column count an xlsx worksheet can hold
pub const MAX_COLUMNS: u32 = 16_384;

/// Largest grid converted in one call (a 4096 x 4096 image)
pub const MAX_CELLS: u64 = 16_777_216;

/// Reject dimensions an xlsx worksheet can't represent, or too large to hold in memory
pub fn validate_dimensions(rows: u32, columns: u32) -> PixcelResult<()> {
    if rows == 0
        || columns == 0
        || rows > MAX_ROWS
        || columns > MAX_COLUMNS
        || u64::from(rows) * u64::from(columns) > MAX_CELLS
    {
        return Err(PixcelError::InvalidDimensions { rows, columns });
    }
    Ok(())
}

/// Cell fills addressed by 1-based `(row, column)`, stored row-major.
///
/// `None` means the cell has no solid RGB fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillGrid {
    rows: u32,
    columns: u32,
    cells: Vec<Option<Rgb>>,
}

impl FillGrid {
    /// Create an unfilled grid
    pub fn new(rows: u32, columns: u32) -> PixcelResult<Self> {
        validate_dimensions(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![None; rows as usize * columns as usize],
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        if row == 0 || column == 0 || row > self.rows || column > self.columns {
            return None;
        }
        Some((row - 1) as usize * self.columns as usize + (column - 1) as usize)
    }

    /// Fill of the cell, `None` when unfilled or outside the grid
    pub fn get(&self, row: u32, column: u32) -> Option<Rgb> {
        self.index(row, column).and_then(|idx| self.cells[idx])
    }

    /// Fill of the cell with white substituted for "no fill"
    pub fn color_at(&self, row: u32, column: u32) -> Rgb {
        self.get(row, column).unwrap_or(Rgb::WHITE)
    }

    pub fn set(&mut self, row: u32, column: u32, fill: Option<Rgb>) -> PixcelResult<()> {
        let idx = self.index(row, column).ok_or_else(|| {
            PixcelError::Workbook(format!(
                "cell ({row}, {column}) is outside the {}x{} grid",
                self.rows, self.columns
            ))
        })?;
        self.cells[idx] = fill;
        Ok(())
    }

    /// Iterate `(row, column, fill)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, Option<Rgb>)> + '_ {
        let columns = self.columns as usize;
        self.cells.iter().enumerate().map(move |(idx, fill)| {
            ((idx / columns) as u32 + 1, (idx % columns) as u32 + 1, *fill)
        })
    }

    /// Number of cells carrying a solid fill
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
