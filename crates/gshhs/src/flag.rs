//! Packed header flag: four 8-bit fields, least-significant first.

use crate::error::{Error, Result};

/// Level names, indexed by the raw level byte.
pub const LEVEL_NAMES: [&str; 5] = [
    "null",
    "land",
    "lake",
    "island_in_lake",
    "pond_in_island_in_lake",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Level {
    Null = 0,
    Land = 1,
    Lake = 2,
    IslandInLake = 3,
    PondInIslandInLake = 4,
}

impl Level {
    #[inline]
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Level::Null),
            1 => Some(Level::Land),
            2 => Some(Level::Lake),
            3 => Some(Level::IslandInLake),
            4 => Some(Level::PondInIslandInLake),
            _ => None,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }
}

/// Origin of the shoreline data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Source {
    /// CIA World Data Bank II.
    Cia = 0,
    /// World Vector Shoreline.
    Wvs = 1,
}

impl Source {
    /// Any byte other than 1 is treated as CIA.
    #[inline]
    pub fn from_raw(raw: u8) -> Self {
        if raw == 1 {
            Source::Wvs
        } else {
            Source::Cia
        }
    }

    /// Single-letter code used in GSHHS listings.
    #[inline]
    pub fn code(self) -> char {
        match self {
            Source::Cia => 'C',
            Source::Wvs => 'W',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag {
    pub level: Level,
    pub version: u8,
    /// Polygon extent straddles the longitude wrap and needs normalization.
    pub greenwich: bool,
    pub source: Source,
}

impl Flag {
    pub fn decode(raw: u32) -> Result<Self> {
        let level_raw = (raw & 0xff) as u8;
        let level = Level::from_raw(level_raw).ok_or(Error::InvalidLevel(level_raw))?;

        Ok(Flag {
            level,
            version: version_of(raw),
            greenwich: (raw >> 16) & 0xff != 0,
            source: Source::from_raw(((raw >> 24) & 0xff) as u8),
        })
    }

    /// Recomposes the packed value. `encode(decode(raw)) == raw` only when the
    /// greenwich and source bytes are 0 or 1; other values collapse to those.
    pub fn encode(self) -> u32 {
        (self.level as u32)
            | (self.version as u32) << 8
            | (self.greenwich as u32) << 16
            | (self.source as u32) << 24
    }
}

/// Version byte of a raw flag, without validating the rest.
#[inline]
pub fn version_of(raw: u32) -> u8 {
    ((raw >> 8) & 0xff) as u8
}
