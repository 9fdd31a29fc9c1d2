//! GRASS `dig_ascii` / `dig_att` / `dig_cats` writers.
//!
//! dig_ascii: fixed header block, then per polygon `L <n>` followed by
//!            ` <lat> <lon>` lines.
//! dig_att:   one `L  <lon> <lat>  <id>` line per polygon, taken at its
//!            second point.
//! dig_cats:  category count, title, blank line, default entry, then one
//!            `<id>:<level>` line per polygon. The count is rewritten in
//!            place once the whole input has been read.

use std::io::{self, ErrorKind, Seek, SeekFrom, Write};

use chrono::{Local, NaiveDateTime};
use gshhs::{PolygonHeader, QueryRect};

pub const MAP_NAME: &str = "Global Shorelines";
pub const MAP_DATE: &str = "2004";
pub const MAP_THRESH: &str = "0.0001";

/// Count written before the real maximum id is known.
pub const CATEGORY_PLACEHOLDER: i32 = 999_999;

/// Point index whose coordinates are used for the attribute line.
const ATTRIBUTE_POINT: usize = 1;

/// Descriptive fields of the dig_ascii header.
#[derive(Debug, Clone)]
pub struct DigMetadata {
    pub digit_date: NaiveDateTime,
    pub digit_name: Option<String>,
}

impl DigMetadata {
    pub fn now(digit_name: Option<String>) -> Self {
        Self {
            digit_date: Local::now().naive_local(),
            digit_name,
        }
    }
}

fn category_header(count: i32) -> String {
    format!("# {:6} categories\n", count)
}

/// Writes the three synchronized dig streams.
pub struct DigEncoder<A: Write, T: Write, C: Write + Seek> {
    ascii: A,
    att: T,
    cats: C,
    max_id: i32,
    polygons: u64,
    points: u64,
}

impl<A: Write, T: Write, C: Write + Seek> DigEncoder<A, T, C> {
    /// Writes the dig_ascii and dig_cats preambles.
    pub fn new(
        mut ascii: A,
        att: T,
        mut cats: C,
        meta: &DigMetadata,
        query: &QueryRect,
    ) -> io::Result<Self> {
        writeln!(ascii, "ORGANIZATION: ")?;
        // Same shape as C ctime(): "Wed Jun 30 21:49:08 1993"
        writeln!(ascii, "DIGIT DATE:   {}", meta.digit_date.format("%a %b %e %H:%M:%S %Y"))?;
        writeln!(
            ascii,
            "DIGIT NAME:   {}",
            meta.digit_name.as_deref().unwrap_or("unknown")
        )?;
        writeln!(ascii, "MAP NAME:     {MAP_NAME}")?;
        writeln!(ascii, "MAP DATE:     {MAP_DATE}")?;
        writeln!(ascii, "MAP SCALE:    1")?;
        writeln!(ascii, "OTHER INFO:   ")?;
        writeln!(ascii, "ZONE:\t 0")?;
        writeln!(ascii, "WEST EDGE:    {:.6}", query.min_x())?;
        writeln!(ascii, "EAST EDGE:    {:.6}", query.max_x())?;
        writeln!(ascii, "SOUTH EDGE:   {:.6}", query.min_y())?;
        writeln!(ascii, "NORTH EDGE:   {:.6}", query.max_y())?;
        writeln!(ascii, "MAP THRESH:   {MAP_THRESH}")?;
        writeln!(ascii, "VERTI:")?;

        cats.write_all(category_header(CATEGORY_PLACEHOLDER).as_bytes())?;
        writeln!(cats, "{MAP_NAME}")?;
        writeln!(cats)?;
        writeln!(cats, "0.0 0.0 0.0 0.0")?;
        writeln!(cats, "0:unknown")?;

        Ok(Self {
            ascii,
            att,
            cats,
            max_id: 0,
            polygons: 0,
            points: 0,
        })
    }

    /// Starts an accepted polygon: geometry header and category entry.
    pub fn begin_polygon(&mut self, header: &PolygonHeader) -> io::Result<()> {
        writeln!(self.ascii, "L {}", header.point_count)?;

        if header.id > self.max_id {
            self.max_id = header.id;
        }
        writeln!(self.cats, "{}:{}", header.id, header.flag.level.name())?;

        self.polygons += 1;
        Ok(())
    }

    /// Writes point `index` of the current polygon.
    pub fn point(&mut self, index: usize, id: i32, lon: f64, lat: f64) -> io::Result<()> {
        if index == ATTRIBUTE_POINT {
            writeln!(self.att, "L  {:15.6} {:15.6}  {:9}\t  ", lon, lat, id)?;
        }
        writeln!(self.ascii, " {:.6} {:.6}", lat, lon)?;

        self.points += 1;
        Ok(())
    }

    pub fn max_id(&self) -> i32 {
        self.max_id
    }

    pub fn polygons_written(&self) -> u64 {
        self.polygons
    }

    pub fn points_written(&self) -> u64 {
        self.points
    }

    /// Rewrites the category count with the maximum accepted id and flushes.
    pub fn finish(mut self) -> io::Result<()> {
        self.ascii.flush()?;
        self.att.flush()?;

        let header = category_header(self.max_id);
        if header.len() != category_header(CATEGORY_PLACEHOLDER).len() {
            return Err(io::Error::new(
                ErrorKind::InvalidData,
                format!("category count {} does not fit the dig_cats header", self.max_id),
            ));
        }

        self.cats.seek(SeekFrom::Start(0))?;
        self.cats.write_all(header.as_bytes())?;
        self.cats.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gshhs::{BoundingBox, Flag, Level, Source, GSHHS_DATA_VERSION};
    use std::io::Cursor;

    fn meta() -> DigMetadata {
        DigMetadata {
            digit_date: NaiveDate::from_ymd_opt(1993, 6, 3)
                .unwrap()
                .and_hms_opt(21, 49, 8)
                .unwrap(),
            digit_name: None,
        }
    }

    fn header(id: i32, n: u32, level: Level) -> PolygonHeader {
        PolygonHeader {
            id,
            point_count: n,
            flag: Flag {
                level,
                version: GSHHS_DATA_VERSION,
                greenwich: false,
                source: Source::Cia,
            },
            bbox: BoundingBox { west: 0, east: 1, south: 0, north: 1 },
            area: 0,
        }
    }

    #[test]
    fn preamble_matches_dig_ascii_layout() {
        let (mut ascii, mut att, mut cats) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let q = QueryRect::new(-10.0, 10.5, -5.0, 5.0).unwrap();

        let enc = DigEncoder::new(&mut ascii, &mut att, Cursor::new(&mut cats), &meta(), &q).unwrap();
        enc.finish().unwrap();

        let expected = "ORGANIZATION: \n\
            DIGIT DATE:   Thu Jun  3 21:49:08 1993\n\
            DIGIT NAME:   unknown\n\
            MAP NAME:     Global Shorelines\n\
            MAP DATE:     2004\n\
            MAP SCALE:    1\n\
            OTHER INFO:   \n\
            ZONE:\t 0\n\
            WEST EDGE:    -10.000000\n\
            EAST EDGE:    10.500000\n\
            SOUTH EDGE:   -5.000000\n\
            NORTH EDGE:   5.000000\n\
            MAP THRESH:   0.0001\n\
            VERTI:\n";
        assert_eq!(String::from_utf8(ascii).unwrap(), expected);
        assert!(att.is_empty());
        assert_eq!(
            String::from_utf8(cats).unwrap(),
            "#      0 categories\nGlobal Shorelines\n\n0.0 0.0 0.0 0.0\n0:unknown\n"
        );
    }

    #[test]
    fn attribute_line_only_at_second_point() {
        let (mut ascii, mut att, mut cats) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let mut m = meta();
        m.digit_name = Some("wessel".into());

        let mut enc =
            DigEncoder::new(&mut ascii, &mut att, Cursor::new(&mut cats), &m, &QueryRect::default())
                .unwrap();
        enc.begin_polygon(&header(42, 3, Level::Lake)).unwrap();
        enc.point(0, 42, 1.0, 2.0).unwrap();
        enc.point(1, 42, -80.25, 45.5).unwrap();
        enc.point(2, 42, 3.0, 4.0).unwrap();
        assert_eq!(enc.max_id(), 42);
        assert_eq!(enc.polygons_written(), 1);
        assert_eq!(enc.points_written(), 3);
        enc.finish().unwrap();

        assert_eq!(
            String::from_utf8(att).unwrap(),
            "L       -80.250000       45.500000         42\t  \n"
        );

        let ascii = String::from_utf8(ascii).unwrap();
        assert!(ascii.contains("DIGIT NAME:   wessel\n"));
        assert!(ascii.ends_with("VERTI:\nL 3\n 2.000000 1.000000\n 45.500000 -80.250000\n 4.000000 3.000000\n"));

        let cats = String::from_utf8(cats).unwrap();
        assert!(cats.starts_with("#     42 categories\n"));
        assert!(cats.ends_with("0:unknown\n42:lake\n"));
    }

    #[test]
    fn count_tracks_maximum_not_number_of_polygons() {
        let (mut ascii, mut att, mut cats) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let mut enc =
            DigEncoder::new(&mut ascii, &mut att, Cursor::new(&mut cats), &meta(), &QueryRect::default())
                .unwrap();
        for id in [17, 3, 9] {
            enc.begin_polygon(&header(id, 0, Level::Land)).unwrap();
        }
        enc.finish().unwrap();

        let cats = String::from_utf8(cats).unwrap();
        assert!(cats.starts_with("#     17 categories\n"));
        assert!(cats.ends_with("17:land\n3:land\n9:land\n"));
        assert!(String::from_utf8(ascii).unwrap().ends_with("L 0\nL 0\nL 0\n"));
    }

    #[test]
    fn oversized_count_is_rejected() {
        let (mut ascii, mut att, mut cats) = (Vec::<u8>::new(), Vec::<u8>::new(), Vec::<u8>::new());
        let mut enc =
            DigEncoder::new(&mut ascii, &mut att, Cursor::new(&mut cats), &meta(), &QueryRect::default())
                .unwrap();
        enc.begin_polygon(&header(1_000_000, 0, Level::Land)).unwrap();

        let err = enc.finish().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
