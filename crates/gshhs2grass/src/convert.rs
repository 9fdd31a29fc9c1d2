use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::{
    fs::File,
    io::{BufReader, Read, Seek, Write},
    path::Path,
    time::Instant,
};

use gshhs::{Endian, LongitudeNormalizer, QueryRect, Reader, GSHHS_DATA_VERSION};

use crate::dig::{DigEncoder, DigMetadata};
use crate::output::OutputPaths;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub polygons_read: u64,
    pub polygons_accepted: u64,
    pub points_written: u64,
    pub max_id: i32,
    pub endian: Option<Endian>,
}

/// Streams every record of `input` through the filter into `encoder`, then
/// finalizes the dig streams.
pub fn convert<R, A, T, C>(input: R, mut encoder: DigEncoder<A, T, C>, query: &QueryRect) -> Result<Summary>
where
    R: Read,
    A: Write,
    T: Write,
    C: Write + Seek,
{
    let mut reader = Reader::new(input);
    let mut normalizer = LongitudeNormalizer::new();
    let mut summary = Summary::default();

    while let Some(header) = reader
        .read_header()
        .with_context(|| format!("Failed to read polygon header #{}", summary.polygons_read))?
    {
        if summary.polygons_read == 0 {
            summary.endian = reader.endian();
            debug!("Byte order: {:?} (swapped: {})", reader.endian(), reader.is_swapped());
            if header.flag.version != GSHHS_DATA_VERSION {
                warn!(
                    "Header version {} does not match expected {}; reading anyway",
                    header.flag.version, GSHHS_DATA_VERSION
                );
            }
        }
        summary.polygons_read += 1;

        let accepted = query.intersects(&header.bbox);
        debug!(
            "Polygon {}: {} pts, level={}, source={}, area={:.1} km^2, greenwich={} -> {}",
            header.id,
            header.point_count,
            header.flag.level.name(),
            header.flag.source.code(),
            header.area_km2(),
            header.flag.greenwich,
            if accepted { "accepted" } else { "rejected" }
        );

        if accepted {
            encoder.begin_polygon(&header)?;

            let points = reader
                .read_points()
                .with_context(|| format!("Failed to read points of polygon {}", header.id))?;
            for (k, p) in points.iter().enumerate() {
                let lon = normalizer.longitude(header.flag.greenwich, p.x);
                let lat = normalizer.latitude(p.y);
                encoder.point(k, header.id, lon, lat)?;
            }
        } else {
            reader
                .skip_points()
                .with_context(|| format!("Failed to skip points of polygon {}", header.id))?;
        }

        normalizer.finish_polygon();
    }

    summary.polygons_accepted = encoder.polygons_written();
    summary.points_written = encoder.points_written();
    summary.max_id = encoder.max_id();

    encoder.finish().context("Failed to finalize dig files")?;

    Ok(summary)
}

/// Converts one GSHHS file into its three dig files.
pub fn convert_file(
    input: &Path,
    outputs: &OutputPaths,
    meta: &DigMetadata,
    query: &QueryRect,
) -> Result<Summary> {
    let start = Instant::now();

    let file = File::open(input).with_context(|| format!("Could not find file {}", input.display()))?;
    let files = outputs.create()?;

    info!(
        "Processing {} -> {}, {}, {}",
        input.display(),
        outputs.ascii.display(),
        outputs.att.display(),
        outputs.cats.display()
    );

    let encoder = DigEncoder::new(files.ascii, files.att, files.cats, meta, query)
        .with_context(|| format!("Failed to write dig headers for {}", input.display()))?;
    let summary = convert(BufReader::new(file), encoder, query)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    info!(
        "OK {} ({} of {} polygons, {} pts, max id {}) in {:.2?}",
        input.display(),
        summary.polygons_accepted,
        summary.polygons_read,
        summary.points_written,
        summary.max_id,
        start.elapsed()
    );

    Ok(summary)
}
