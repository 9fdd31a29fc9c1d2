//! GSHHS shoreline to GRASS dig_ascii conversion.
//!
//! Decodes GSHHS polygon records, keeps those overlapping a selection
//! window and writes them as the three GRASS 4 ASCII vector files.

pub mod config;
pub mod convert;
pub mod dig;
pub mod output;

pub use convert::{convert, convert_file, Summary};
