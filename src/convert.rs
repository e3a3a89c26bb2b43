//! Image ↔ spreadsheet conversions
//!
//! `ex2pix` maps each cell fill of a sheet region to one pixel; `pix2ex`
//! resizes an image to the grid shape and maps each pixel to one solid fill.
//! Cell `(row, column)` always corresponds to pixel `(column - 1, row - 1)`.

use crate::color::Rgb;
use crate::error::{PixcelError, PixcelResult};
use crate::excel::{FillReader, FillWriter};
use crate::grid::FillGrid;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension used when no image output path is given
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";
/// Folder used when no spreadsheet output folder is given
pub const DEFAULT_OUTPUT_FOLDER: &str = "output";

/// Interpolation used when resizing an image to the grid shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResizeFilter {
    /// Nearest neighbor, keeps hard pixel-art edges
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Options for spreadsheet → image
#[derive(Debug, Clone, Default)]
pub struct Ex2PixOptions {
    /// Sheet to read; the active sheet when `None`
    pub sheet: Option<String>,
}

/// Options for image → spreadsheet
#[derive(Debug, Clone, Default)]
pub struct Pix2ExOptions {
    pub filter: ResizeFilter,
    /// Square cell size in pixels
    pub cell_size: Option<u16>,
}

/// Render a fill grid as an image of the same shape, white where unfilled
pub fn grid_to_image(grid: &FillGrid) -> RgbImage {
    let mut image = RgbImage::new(grid.columns(), grid.rows());
    for (row, column, fill) in grid.iter() {
        let color = fill.unwrap_or(Rgb::WHITE);
        image.put_pixel(column - 1, row - 1, color.into());
    }
    image
}

/// Map every pixel to a solid fill on a grid of the image's shape
pub fn image_to_grid(image: &RgbImage) -> PixcelResult<FillGrid> {
    let (width, height) = image.dimensions();
    let mut grid = FillGrid::new(height, width)?;
    for (x, y, pixel) in image.enumerate_pixels() {
        grid.set(y + 1, x + 1, Some(Rgb::from(*pixel)))?;
    }
    Ok(grid)
}

/// Resize to `columns` × `rows` pixels; an image already that size is returned untouched
pub fn resize_to_grid(image: DynamicImage, rows: u32, columns: u32, filter: ResizeFilter) -> RgbImage {
    let rgb = image.into_rgb8();
    if rgb.dimensions() == (columns, rows) {
        return rgb;
    }
    imageops::resize(&rgb, columns, rows, filter.into())
}

/// Default image path for a spreadsheet: same path, image extension
pub fn default_image_path(excel_path: &Path) -> PathBuf {
    excel_path.with_extension(DEFAULT_IMAGE_EXTENSION)
}

/// `<folder>/<image stem>.xlsx`
pub fn workbook_path(image_path: &Path, output_folder: &Path) -> PixcelResult<PathBuf> {
    let stem = image_path.file_stem().ok_or_else(|| {
        PixcelError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("image path '{}' has no file name", image_path.display()),
        ))
    })?;
    let mut file_name = stem.to_os_string();
    file_name.push(".xlsx");
    Ok(output_folder.join(file_name))
}

/// Convert the top-left `rows` × `columns` cells of a spreadsheet to an image
pub fn ex2pix(
    excel_path: &Path,
    rows: u32,
    columns: u32,
    output_path: &Path,
    options: &Ex2PixOptions,
) -> PixcelResult<()> {
    debug!(input = %excel_path.display(), rows, columns, "Reading cell fills");
    let grid = FillReader::new(excel_path)
        .with_sheet(options.sheet.clone())
        .read(rows, columns)?;

    let image = grid_to_image(&grid);
    image.save(output_path)?;
    info!(output = %output_path.display(), "Saved image");
    Ok(())
}

/// Convert an image to a `rows` × `columns` spreadsheet in `output_folder`.
///
/// The folder is created when missing. Returns the path of the written workbook.
pub fn pix2ex(
    image_path: &Path,
    rows: u32,
    columns: u32,
    output_folder: &Path,
    options: &Pix2ExOptions,
) -> PixcelResult<PathBuf> {
    crate::grid::validate_dimensions(rows, columns)?;

    let source = image::open(image_path)?;
    debug!(
        input = %image_path.display(),
        width = source.width(),
        height = source.height(),
        filter = ?options.filter,
        "Resizing image to grid"
    );
    let image = resize_to_grid(source, rows, columns, options.filter);
    let grid = image_to_grid(&image)?;

    fs::create_dir_all(output_folder)?;
    let output_path = workbook_path(image_path, output_folder)?;
    FillWriter::new()
        .with_cell_size(options.cell_size)
        .write(&grid, &output_path)?;
    info!(output = %output_path.display(), "Saved workbook");

    Ok(output_path)
}
