//! Excel cell-fill reading and writing
//!
//! - Read: .xlsx worksheet → [`FillGrid`](crate::grid::FillGrid) of solid fill colors
//! - Write: [`FillGrid`](crate::grid::FillGrid) → .xlsx worksheet with solid fills

mod reader;
mod writer;

pub use reader::FillReader;
pub use writer::FillWriter;
