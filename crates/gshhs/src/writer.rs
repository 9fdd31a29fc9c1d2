use std::io::Write;

use crate::error::{Error, Result};
use crate::reader::Endian;
use crate::record::{Point, PolygonHeader, Record};

/// Writes GSHHS records in a fixed byte order.
///
/// Used to build test inputs in either byte order; the converter itself
/// never writes GSHHS.
pub struct Writer<W: Write> {
    inner: W,
    endian: Endian,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W, endian: Endian) -> Self {
        Self { inner, endian }
    }

    pub fn write_polygon(&mut self, header: &PolygonHeader, points: &[Point]) -> Result<()> {
        if header.point_count as usize != points.len() {
            return Err(Error::PointCountMismatch {
                id: header.id,
                declared: header.point_count,
                actual: points.len(),
            });
        }

        let e = self.endian;
        let w = &mut self.inner;

        e.write_i32(w, header.id)?;
        e.write_i32(w, header.point_count as i32)?;
        e.write_i32(w, header.flag.encode() as i32)?;
        e.write_i32(w, header.bbox.west)?;
        e.write_i32(w, header.bbox.east)?;
        e.write_i32(w, header.bbox.south)?;
        e.write_i32(w, header.bbox.north)?;
        e.write_i32(w, header.area)?;

        for p in points {
            e.write_i32(w, p.x)?;
            e.write_i32(w, p.y)?;
        }

        Ok(())
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_polygon(&record.header, &record.points)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::{Flag, Level, Source};
    use crate::reader::Reader;
    use crate::record::BoundingBox;
    use crate::{GSHHS_DATA_VERSION, HEADER_LEN, POINT_LEN};

    fn island(id: i32, points: Vec<Point>) -> Record {
        Record {
            header: PolygonHeader {
                id,
                point_count: points.len() as u32,
                flag: Flag {
                    level: Level::IslandInLake,
                    version: GSHHS_DATA_VERSION,
                    greenwich: false,
                    source: Source::Wvs,
                },
                bbox: BoundingBox { west: -1, east: 1, south: -2, north: 2 },
                area: 12,
            },
            points,
        }
    }

    #[test]
    fn little_endian_output_reads_back_swapped() {
        let rec = island(11, vec![Point { x: 1, y: -1 }, Point { x: -1, y: 1 }]);

        let mut w = Writer::new(Vec::new(), Endian::Little);
        w.write_record(&rec).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes.len(), HEADER_LEN + 2 * POINT_LEN);

        let mut reader = Reader::new(&bytes[..]);
        assert_eq!(reader.read_record().unwrap(), Some(rec));
        assert!(reader.is_swapped());
    }

    #[test]
    fn declared_count_must_match_points() {
        let mut rec = island(1, vec![Point { x: 0, y: 0 }]);
        rec.header.point_count = 4;

        let mut w = Writer::new(Vec::new(), Endian::Big);
        assert!(matches!(
            w.write_record(&rec),
            Err(Error::PointCountMismatch { id: 1, declared: 4, actual: 1 })
        ));
        assert!(w.into_inner().is_empty());
    }
}
