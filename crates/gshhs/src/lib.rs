//! GSHHS: Global Self-consistent Hierarchical High-resolution Shorelines.
//!
//! - One record per closed polygon (coastline, lake, island, pond).
//! - Coordinates and extents are i32 micro-degrees (1e-6 deg ticks).
//! - No record count prefix; records repeat until end of file.
//!
//! Record layout (distribution order is big-endian):
//!   00  : i32     id
//!   04  : i32     n (points that follow)
//!   08  : u32     flag = level | version << 8 | greenwich << 16 | source << 24
//!   0C  : i32     west
//!   10  : i32     east
//!   14  : i32     south
//!   18  : i32     north
//!   1C  : i32     area (1/10 km^2)
//!   20  : n x { i32 x, i32 y }
//!
//! The byte order of a stream is fixed by its first header: if the version
//! byte of the flag does not match [`GSHHS_DATA_VERSION`] when read
//! big-endian, the whole stream is read little-endian.

pub mod bbox;
pub mod error;
pub mod flag;
pub mod normalize;
pub mod reader;
mod record;
pub mod writer;

pub use bbox::QueryRect;
pub use error::{Error, Result};
pub use flag::{Flag, Level, Source, LEVEL_NAMES};
pub use normalize::LongitudeNormalizer;
pub use reader::{Endian, Reader};
pub use record::{BoundingBox, Point, PolygonHeader, Record};
pub use writer::Writer;

/// Version byte carried in the flag of GSHHS v1.5 headers.
pub const GSHHS_DATA_VERSION: u8 = 6;

/// Size of one polygon header on disk.
pub const HEADER_LEN: usize = 32;

/// Size of one coordinate pair on disk.
pub const POINT_LEN: usize = 8;

/// Degrees per micro-degree tick.
pub const MICRO_DEG: f64 = 1.0e-6;

#[inline]
pub fn micro_to_deg(v: i32) -> f64 {
    v as f64 * MICRO_DEG
}
