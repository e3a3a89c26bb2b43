//! pixcel - pixel art between images and spreadsheets
//!
//! Every pixel of an image becomes the solid fill color of one spreadsheet
//! cell, and every cell fill of a sheet region becomes one pixel.
//!
//! # Example
//!
//! ```no_run
//! use pixcel::convert::{ex2pix, pix2ex, Ex2PixOptions, Pix2ExOptions};
//! use std::path::Path;
//!
//! let workbook = pix2ex(
//!     Path::new("sprite.png"),
//!     32,
//!     32,
//!     Path::new("output"),
//!     &Pix2ExOptions::default(),
//! )?;
//!
//! ex2pix(&workbook, 32, 32, Path::new("sprite_back.png"), &Ex2PixOptions::default())?;
//! # Ok::<(), pixcel::error::PixcelError>(())
//! ```

pub mod cli;
pub mod color;
pub mod convert;
pub mod error;
pub mod excel;
pub mod grid;

// Re-export commonly used types
pub use color::Rgb;
pub use error::{PixcelError, PixcelResult};
pub use grid::FillGrid;
