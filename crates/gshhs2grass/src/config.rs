use clap::Parser;
use gshhs::QueryRect;
use std::path::PathBuf;

use crate::output::Layout;

/// `gshhs2grass` - converts GSHHS binary shorelines into GRASS dig_ascii vectors.
///
/// Reads `gshhs_[f|h|i|l|c].b` files and writes `dig_ascii`, `dig_att` and
/// `dig_cats` files for each, keeping only polygons that overlap the
/// selection window. Import the results with `v.in.ascii` and `v.support`.
#[derive(Parser, Debug, Clone)]
#[command(name = "gshhs2grass", version, about, long_about = None)]
pub struct Config {
    /// GSHHS binary input file. Repeat to convert several files.
    #[arg(short = 'i', long = "input", required = true)]
    pub inputs: Vec<PathBuf>,

    /// West edge of the selection window (degrees).
    #[arg(short = 'x', long, default_value_t = -360.0, allow_negative_numbers = true)]
    pub minx: f64,

    /// East edge of the selection window (degrees).
    #[arg(short = 'X', long, default_value_t = 360.0, allow_negative_numbers = true)]
    pub maxx: f64,

    /// South edge of the selection window (degrees).
    #[arg(short = 'y', long, default_value_t = -90.0, allow_negative_numbers = true)]
    pub miny: f64,

    /// North edge of the selection window (degrees).
    #[arg(short = 'Y', long, default_value_t = 90.0, allow_negative_numbers = true)]
    pub maxy: f64,

    /// Directory receiving the dig files.
    #[arg(short, long, default_value = ".", env = "GSHHS2GRASS_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// File naming scheme for the dig files.
    #[arg(long, value_enum, default_value_t = Layout::Flat)]
    pub layout: Layout,

    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// Name written as DIGIT NAME; defaults to the current user.
    #[arg(long, env = "GSHHS2GRASS_DIGIT_NAME")]
    pub digit_name: Option<String>,
}

impl Config {
    pub fn query_rect(&self) -> gshhs::Result<QueryRect> {
        QueryRect::new(self.minx, self.maxx, self.miny, self.maxy)
    }

    pub fn resolve_digit_name(&self) -> Option<String> {
        self.digit_name
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .filter(|name| !name.is_empty())
    }
}
