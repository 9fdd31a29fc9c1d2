use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid polygon level {0} (expected 0..=4)")]
    InvalidLevel(u8),

    #[error("polygon {id} declares a negative point count ({count})")]
    NegativeCount { id: i32, count: i32 },

    #[error("truncated GSHHS record: polygon {id} declares {expected} points, only {read} present")]
    Truncated { id: i32, expected: u32, read: u32 },

    #[error("polygon {id} declares {declared} points but {actual} were supplied")]
    PointCountMismatch { id: i32, declared: u32, actual: usize },

    #[error("invalid query rectangle: min{axis} {min} > max{axis} {max}")]
    InvalidQuery { axis: char, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
