use crate::flag::Flag;
use crate::micro_to_deg;

/// Polygon extent in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub west: i32,
    pub east: i32,
    pub south: i32,
    pub north: i32,
}

impl BoundingBox {
    /// Returns `(west, east, south, north)` in degrees.
    #[inline]
    pub fn to_deg(self) -> (f64, f64, f64, f64) {
        (
            micro_to_deg(self.west),
            micro_to_deg(self.east),
            micro_to_deg(self.south),
            micro_to_deg(self.north),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonHeader {
    pub id: i32,
    pub point_count: u32,
    pub flag: Flag,
    pub bbox: BoundingBox,
    /// Area in 1/10 km^2.
    pub area: i32,
}

impl PolygonHeader {
    #[inline]
    pub fn area_km2(&self) -> f64 {
        0.1 * self.area as f64
    }
}

/// One coordinate sample in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub header: PolygonHeader,
    pub points: Vec<Point>,
}
