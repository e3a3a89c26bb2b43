//! Fill colors and their hex encoding
//!
//! Spreadsheets store fill colors as hex strings, either `RRGGBB` or the
//! `AARRGGBB` form Excel writes into `styles.xml`. Images store raw channel
//! bytes. [`Rgb`] is the common currency between the two.

use crate::error::{PixcelError, PixcelResult};
use std::fmt;

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Color used for cells without a solid RGB fill
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode `RRGGBB`, `#RRGGBB` or `AARRGGBB` (alpha is ignored)
    pub fn from_hex(hex: &str) -> PixcelResult<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PixcelError::InvalidColor(hex.to_string()));
        }

        let rgb = match digits.len() {
            6 => digits,
            8 => &digits[2..],
            _ => return Err(PixcelError::InvalidColor(hex.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&rgb[range], 16)
                .map_err(|_| PixcelError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Encode as six uppercase hex digits (`RRGGBB`)
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Pack as `0xRRGGBB`, the form `rust_xlsxwriter::Color::RGB` takes
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(color: Rgb) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}
