use anyhow::Context;
use clap::{Parser, Subcommand};
use pixcel::cli;
use pixcel::convert::{ResizeFilter, DEFAULT_OUTPUT_FOLDER};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixcel")]
#[command(about = "Convert between Excel sheets and images.")]
#[command(long_about = "pixcel - pixel art in spreadsheet cells

Each image pixel maps to the solid fill color of one cell, and back.

COMMANDS:
  ex2pix - Excel sheet (.xlsx) to image
  pix2ex - Image to Excel sheet (.xlsx)

EXAMPLES:
  pixcel pix2ex sprite.png 32 32                 # writes output/sprite.xlsx
  pixcel ex2pix output/sprite.xlsx 32 32 -o back.png

LOGGING:
  Set RUST_LOG (e.g. RUST_LOG=pixcel=debug) or pass --verbose.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert an Excel sheet to an image.

Reads the solid fill color of every cell in the top-left NUM_ROWS x NUM_COLUMNS
region of the active sheet (or --sheet) and writes one pixel per cell.
Cells without a solid RGB fill, including cells past the populated region,
become white pixels.

The image format follows the output extension (png, jpg, bmp, gif).
Default output: the Excel path with a .png extension.")]
    /// Convert Excel sheet to image
    Ex2pix {
        /// Path to the Excel file
        excel_path: PathBuf,

        /// Number of rows in the image
        num_rows: u32,

        /// Number of columns in the image
        num_columns: u32,

        /// Output path for the image
        #[arg(short = 'o', long = "output_path")]
        output_path: Option<PathBuf>,

        /// Sheet to read instead of the active one
        #[arg(short, long)]
        sheet: Option<String>,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Convert an image to an Excel sheet.

Resizes the image to NUM_COLUMNS x NUM_ROWS pixels and writes each pixel as
a solid cell fill. The workbook is named after the image
(sprite.png -> <output_folder>/sprite.xlsx); the folder is created if absent.")]
    /// Convert image to Excel sheet
    Pix2ex {
        /// Path to the image
        image_path: PathBuf,

        /// Number of rows in the Excel sheet
        num_rows: u32,

        /// Number of columns in the Excel sheet
        num_columns: u32,

        /// Output folder for the Excel sheet
        #[arg(
            short = 'o',
            long = "output_folder",
            default_value = DEFAULT_OUTPUT_FOLDER,
            env = "PIXCEL_OUTPUT_FOLDER"
        )]
        output_folder: PathBuf,

        /// Resize interpolation filter
        #[arg(short, long, value_enum, default_value_t = ResizeFilter::Nearest, env = "PIXCEL_FILTER")]
        filter: ResizeFilter,

        /// Set column width and row height to this many pixels (square cells)
        #[arg(long)]
        cell_size: Option<u16>,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pixcel=debug" } else { "pixcel=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ex2pix {
            excel_path,
            num_rows,
            num_columns,
            output_path,
            sheet,
            verbose,
        } => {
            init_tracing(verbose);
            let input = excel_path.display().to_string();
            cli::ex2pix(excel_path, num_rows, num_columns, output_path, sheet, verbose)
                .with_context(|| format!("ex2pix failed for {}", input))
        }

        Commands::Pix2ex {
            image_path,
            num_rows,
            num_columns,
            output_folder,
            filter,
            cell_size,
            verbose,
        } => {
            init_tracing(verbose);
            let input = image_path.display().to_string();
            cli::pix2ex(
                image_path,
                num_rows,
                num_columns,
                output_folder,
                filter,
                cell_size,
                verbose,
            )
            .with_context(|| format!("pix2ex failed for {}", input))
        }
    }
}
