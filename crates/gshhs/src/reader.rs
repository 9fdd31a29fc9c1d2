use std::io::{self, ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{Error, Result};
use crate::flag::{version_of, Flag};
use crate::record::{BoundingBox, Point, PolygonHeader, Record};
use crate::{GSHHS_DATA_VERSION, HEADER_LEN, POINT_LEN};

/// Byte order of every integer in one GSHHS stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    /// Distribution order of the published datasets.
    Big,
    Little,
}

impl Endian {
    /// Chooses the stream order from the first raw header.
    pub fn detect(header: &[u8; HEADER_LEN]) -> Self {
        if version_of(BigEndian::read_u32(&header[8..12])) == GSHHS_DATA_VERSION {
            Endian::Big
        } else {
            Endian::Little
        }
    }

    #[inline]
    fn i32_at(self, buf: &[u8], offset: usize) -> i32 {
        let b = &buf[offset..offset + 4];
        match self {
            Endian::Big => BigEndian::read_i32(b),
            Endian::Little => LittleEndian::read_i32(b),
        }
    }

    #[inline]
    fn u32_at(self, buf: &[u8], offset: usize) -> u32 {
        self.i32_at(buf, offset) as u32
    }

    #[inline]
    pub(crate) fn read_i32<R: Read>(self, r: &mut R) -> io::Result<i32> {
        match self {
            Endian::Big => r.read_i32::<BigEndian>(),
            Endian::Little => r.read_i32::<LittleEndian>(),
        }
    }

    #[inline]
    pub(crate) fn write_i32<W: io::Write>(self, w: &mut W, v: i32) -> io::Result<()> {
        match self {
            Endian::Big => w.write_i32::<BigEndian>(v),
            Endian::Little => w.write_i32::<LittleEndian>(v),
        }
    }
}

/// Decodes one 32-byte header in the given byte order.
pub fn decode_header(buf: &[u8; HEADER_LEN], endian: Endian) -> Result<PolygonHeader> {
    let id = endian.i32_at(buf, 0);
    let count = endian.i32_at(buf, 4);
    if count < 0 {
        return Err(Error::NegativeCount { id, count });
    }

    Ok(PolygonHeader {
        id,
        point_count: count as u32,
        flag: Flag::decode(endian.u32_at(buf, 8))?,
        bbox: BoundingBox {
            west: endian.i32_at(buf, 12),
            east: endian.i32_at(buf, 16),
            south: endian.i32_at(buf, 20),
            north: endian.i32_at(buf, 24),
        },
        area: endian.i32_at(buf, 28),
    })
}

/// Fills `buf` as far as the stream allows and returns the byte count.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0usize;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Upper bound on points reserved before any point bytes are read.
const MAX_PREALLOC_POINTS: u32 = 64 * 1024;

#[derive(Debug, Clone, Copy)]
struct Pending {
    id: i32,
    declared: u32,
    remaining: u32,
}

/// Sequential GSHHS record reader.
///
/// Every header must have its points consumed, either through
/// [`read_points`](Self::read_points) or [`skip_points`](Self::skip_points),
/// before the next header; [`read_header`](Self::read_header) skips any
/// leftovers itself.
pub struct Reader<R> {
    inner: R,
    endian: Option<Endian>,
    pending: Option<Pending>,
    records: u64,
    failed: bool,
}

impl<R: Read> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            endian: None,
            pending: None,
            records: 0,
            failed: false,
        }
    }

    /// Byte order chosen from the first header; `None` before it is read.
    pub fn endian(&self) -> Option<Endian> {
        self.endian
    }

    /// True once the stream has been found to need byte swapping.
    pub fn is_swapped(&self) -> bool {
        self.endian == Some(Endian::Little)
    }

    pub fn records_read(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads the next header, or `None` when less than a full header remains.
    pub fn read_header(&mut self) -> Result<Option<PolygonHeader>> {
        self.skip_points()?;

        let mut buf = [0u8; HEADER_LEN];
        if read_full(&mut self.inner, &mut buf)? < HEADER_LEN {
            return Ok(None);
        }

        let endian = *self.endian.get_or_insert_with(|| Endian::detect(&buf));
        let header = decode_header(&buf, endian)?;

        self.records += 1;
        self.pending = Some(Pending {
            id: header.id,
            declared: header.point_count,
            remaining: header.point_count,
        });

        Ok(Some(header))
    }

    /// Reads the points declared by the current header.
    pub fn read_points(&mut self) -> Result<Vec<Point>> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(Vec::new());
        };
        let endian = self.endian.unwrap_or(Endian::Big);

        let mut points = Vec::with_capacity(pending.remaining.min(MAX_PREALLOC_POINTS) as usize);
        let mut raw = [0u8; POINT_LEN];
        while pending.remaining > 0 {
            if read_full(&mut self.inner, &mut raw)? < POINT_LEN {
                return Err(truncated(&pending));
            }
            let mut cursor = &raw[..];
            points.push(Point {
                x: endian.read_i32(&mut cursor)?,
                y: endian.read_i32(&mut cursor)?,
            });
            pending.remaining -= 1;
        }

        Ok(points)
    }

    /// Consumes the points of the current header without decoding them.
    pub fn skip_points(&mut self) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };

        let want = pending.remaining as u64 * POINT_LEN as u64;
        let copied = io::copy(&mut (&mut self.inner).take(want), &mut io::sink())?;
        if copied < want {
            let consumed = (copied / POINT_LEN as u64) as u32;
            return Err(truncated(&Pending {
                remaining: pending.remaining - consumed,
                ..pending
            }));
        }

        Ok(())
    }

    /// Reads one whole record.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let Some(header) = self.read_header()? else {
            return Ok(None);
        };
        let points = self.read_points()?;
        Ok(Some(Record { header, points }))
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = self.read_record().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

#[cold]
fn truncated(pending: &Pending) -> Error {
    Error::Truncated {
        id: pending.id,
        expected: pending.declared,
        read: pending.declared - pending.remaining,
    }
}
