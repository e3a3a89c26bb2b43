//! Excel writer implementation - FillGrid → cell fills (.xlsx)

use crate::color::Rgb;
use crate::error::PixcelResult;
use crate::grid::FillGrid;
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Writes a [`FillGrid`] as solid cell fills on a single worksheet
#[derive(Debug, Clone, Default)]
pub struct FillWriter {
    /// Column width and row height in pixels, for square cells
    cell_size: Option<u16>,
}

impl FillWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size every used column and row to `pixels`
    pub fn with_cell_size(mut self, pixels: Option<u16>) -> Self {
        self.cell_size = pixels;
        self
    }

    /// Write the grid to an .xlsx file
    pub fn write(&self, grid: &FillGrid, output_path: &Path) -> PixcelResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // Identical colors reuse one format so styles.xml stays small
        let mut formats: HashMap<Rgb, Format> = HashMap::new();

        for (row, column, fill) in grid.iter() {
            let Some(color) = fill else {
                continue;
            };
            let format = formats.entry(color).or_insert_with(|| solid_fill(color));
            worksheet.write_blank(row - 1, (column - 1) as u16, format)?;
        }

        if let Some(pixels) = self.cell_size {
            for column in 0..grid.columns() {
                worksheet.set_column_width_pixels(column as u16, pixels)?;
            }
            for row in 0..grid.rows() {
                worksheet.set_row_height_pixels(row, pixels)?;
            }
        }

        debug!(
            rows = grid.rows(),
            columns = grid.columns(),
            distinct_colors = formats.len(),
            "Writing workbook"
        );
        workbook.save(output_path)?;
        Ok(())
    }
}

fn solid_fill(color: Rgb) -> Format {
    let xlsx_color = Color::RGB(color.to_u32());
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_foreground_color(xlsx_color)
        .set_background_color(xlsx_color)
}
