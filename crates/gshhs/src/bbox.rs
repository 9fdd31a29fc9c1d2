use crate::error::{Error, Result};
use crate::record::BoundingBox;

/// Caller-supplied selection window in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryRect {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
}

impl QueryRect {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Result<Self> {
        if min_x > max_x {
            return Err(Error::InvalidQuery { axis: 'x', min: min_x, max: max_x });
        }
        if min_y > max_y {
            return Err(Error::InvalidQuery { axis: 'y', min: min_y, max: max_y });
        }

        Ok(Self { min_x, max_x, min_y, max_y })
    }

    /// The whole globe: (-360, 360, -90, 90).
    pub const fn unbounded() -> Self {
        Self { min_x: -360.0, max_x: 360.0, min_y: -90.0, max_y: 90.0 }
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    #[inline]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Strict overlap: boxes that only share an edge are rejected.
    #[inline]
    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        let (w, e, s, n) = bbox.to_deg();
        (w < self.max_x && e > self.min_x) && (s < self.max_y && n > self.min_y)
    }
}

impl Default for QueryRect {
    fn default() -> Self {
        Self::unbounded()
    }
}
