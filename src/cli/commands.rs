use crate::convert::{self, Ex2PixOptions, Pix2ExOptions, ResizeFilter};
use crate::error::PixcelResult;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the ex2pix command
pub fn ex2pix(
    excel_path: PathBuf,
    num_rows: u32,
    num_columns: u32,
    output_path: Option<PathBuf>,
    sheet: Option<String>,
    verbose: bool,
) -> PixcelResult<()> {
    let output_path = output_path.unwrap_or_else(|| convert::default_image_path(&excel_path));

    println!("{}", "🎨 pixcel - Excel to image".bold().green());
    println!("   Input:  {}", excel_path.display());
    println!("   Grid:   {} rows x {} columns", num_rows, num_columns);
    if let Some(ref name) = sheet {
        println!("   Sheet:  {}", name.bright_yellow());
    }
    println!();

    if verbose {
        println!("{}", "📖 Reading cell fills...".cyan());
    }

    let options = Ex2PixOptions { sheet };
    convert::ex2pix(&excel_path, num_rows, num_columns, &output_path, &options)?;

    println!("Pixel art image saved to: {}", output_path.display());
    Ok(())
}

/// Execute the pix2ex command
pub fn pix2ex(
    image_path: PathBuf,
    num_rows: u32,
    num_columns: u32,
    output_folder: PathBuf,
    filter: ResizeFilter,
    cell_size: Option<u16>,
    verbose: bool,
) -> PixcelResult<()> {
    println!("{}", "🎨 pixcel - Image to Excel".bold().green());
    println!("   Input:  {}", image_path.display());
    println!("   Grid:   {} rows x {} columns", num_rows, num_columns);
    println!();

    if verbose {
        println!(
            "{}",
            format!("🖼  Resizing with {:?} filter...", filter).cyan()
        );
    }

    let options = Pix2ExOptions { filter, cell_size };
    let workbook =
        convert::pix2ex(&image_path, num_rows, num_columns, &output_folder, &options)?;

    println!("Excel sheet saved to: {}", workbook.display());
    Ok(())
}
