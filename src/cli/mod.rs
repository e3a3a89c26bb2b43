//! CLI command handlers

pub mod commands;

pub use commands::{ex2pix, pix2ex};
