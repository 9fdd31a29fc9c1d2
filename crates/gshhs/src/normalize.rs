use crate::micro_to_deg;

/// Wrap threshold for the first polygon of a stream (Eurasia-Africa spans past 270).
pub const FIRST_WRAP_THRESHOLD: i32 = 270_000_000;

/// Wrap threshold for every later polygon.
pub const WRAP_THRESHOLD: i32 = 180_000_000;

/// Per-stream longitude wrapping state.
///
/// Call [`finish_polygon`](Self::finish_polygon) after every polygon read,
/// whether or not it was emitted.
#[derive(Debug, Clone)]
pub struct LongitudeNormalizer {
    threshold: i32,
}

impl LongitudeNormalizer {
    pub fn new() -> Self {
        Self { threshold: FIRST_WRAP_THRESHOLD }
    }

    #[inline]
    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    #[inline]
    pub fn longitude(&self, greenwich: bool, x: i32) -> f64 {
        if greenwich && x > self.threshold {
            micro_to_deg(x) - 360.0
        } else {
            micro_to_deg(x)
        }
    }

    #[inline]
    pub fn latitude(&self, y: i32) -> f64 {
        micro_to_deg(y)
    }

    #[inline]
    pub fn finish_polygon(&mut self) {
        self.threshold = WRAP_THRESHOLD;
    }
}

impl Default for LongitudeNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
