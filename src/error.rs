use thiserror::Error;

pub type PixcelResult<T> = Result<T, PixcelError>;

#[derive(Error, Debug)]
pub enum PixcelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Excel write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Workbook archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Workbook XML error: {0}")]
    Xml(String),

    #[error("Invalid workbook: {0}")]
    Workbook(String),

    #[error("Invalid color '{0}': expected RRGGBB or AARRGGBB hex digits")]
    InvalidColor(String),

    #[error("Invalid dimensions {rows}x{columns}: rows must be 1..=1048576, columns 1..=16384, at most 16777216 cells")]
    InvalidDimensions { rows: u32, columns: u32 },
}

impl From<roxmltree::Error> for PixcelError {
    fn from(e: roxmltree::Error) -> Self {
        PixcelError::Xml(e.to_string())
    }
}
