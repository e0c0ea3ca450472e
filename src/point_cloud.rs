use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, error};
use pcd_rs::{DynReader, Field};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::types::PointRecord;

/// Size of one `x y z intensity` row in a `.bin` file
pub const BIN_RECORD_SIZE: usize = 4 * std::mem::size_of::<f32>();

/// Coordinates of a decoded cloud plus the optional auxiliary channel
/// (the red color component, normalized to `[0, 1]`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedCloud {
    pub points: Vec<[f32; 3]>,
    pub channel: Option<Vec<f32>>,
}

/// What happened to one point cloud on its way to `.bin`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOutcome {
    pub points_written: usize,
    pub placeholder: bool,
}

fn first_scalar(field: &Field) -> Option<f64> {
    match field {
        Field::I8(v) => v.first().map(|&x| x as f64),
        Field::I16(v) => v.first().map(|&x| x as f64),
        Field::I32(v) => v.first().map(|&x| x as f64),
        Field::U8(v) => v.first().map(|&x| x as f64),
        Field::U16(v) => v.first().map(|&x| x as f64),
        Field::U32(v) => v.first().map(|&x| x as f64),
        Field::F32(v) => v.first().map(|&x| x as f64),
        Field::F64(v) => v.first().copied(),
    }
}

// PCL packs 0x00RRGGBB into the bits of a float (or a u32 for rgba)
fn packed_red(field: &Field) -> Option<f32> {
    let bits = match field {
        Field::F32(v) => v.first().map(|x| x.to_bits()),
        Field::U32(v) => v.first().copied(),
        Field::I32(v) => v.first().map(|&x| x as u32),
        _ => None,
    }?;
    Some(((bits >> 16) & 0xff) as f32 / 255.0)
}

/// Decode a PCD file into coordinates and, when present, its auxiliary channel.
///
/// The channel is the red component of a packed `rgb`/`rgba` field. Other
/// per-point fields, `intensity` included, are ignored.
pub fn decode_point_cloud(path: &Path) -> Result<DecodedCloud> {
    let reader = DynReader::open(path).map_err(|e| ConvertError::pcd(path, e))?;

    let meta = reader.meta();
    let fields = &meta.field_defs.fields;
    let index_of = |name: &str| fields.iter().position(|f| f.name.eq_ignore_ascii_case(name));

    let (x_idx, y_idx, z_idx) = match (index_of("x"), index_of("y"), index_of("z")) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Err(ConvertError::pcd(path, "missing one of the x, y or z fields")),
    };
    let channel = index_of("rgb").or_else(|| index_of("rgba"));
    let capacity = meta.num_points as usize;

    let mut points = Vec::with_capacity(capacity);
    let mut values = Vec::with_capacity(if channel.is_some() { capacity } else { 0 });

    for record in reader {
        let record = record.map_err(|e| ConvertError::pcd(path, e))?;
        let coord = |idx: usize| record.0.get(idx).and_then(first_scalar);

        match (coord(x_idx), coord(y_idx), coord(z_idx)) {
            (Some(x), Some(y), Some(z)) => points.push([x as f32, y as f32, z as f32]),
            _ => {
                return Err(ConvertError::pcd(
                    path,
                    format!("point {} has an empty coordinate field", points.len()),
                ))
            }
        }

        if let Some(idx) = channel {
            let value = record.0.get(idx).and_then(packed_red);
            values.push(value.unwrap_or(0.0));
        }
    }

    Ok(DecodedCloud {
        points,
        channel: channel.map(|_| values),
    })
}

/// Attach intensity to every point: `channel * scale`, or zero when the
/// cloud has no (or an empty) auxiliary channel.
pub fn encode_points(cloud: &DecodedCloud, intensity_scale: f32) -> Vec<PointRecord> {
    let channel = cloud.channel.as_deref().filter(|values| !values.is_empty());

    cloud
        .points
        .iter()
        .enumerate()
        .map(|(i, &[x, y, z])| {
            let intensity = channel
                .and_then(|values| values.get(i))
                .map_or(0.0, |&value| value * intensity_scale);
            PointRecord { x, y, z, intensity }
        })
        .collect()
}

/// Write points as packed little-endian f32 rows, no header.
pub fn write_bin(path: &Path, points: &[PointRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    let write_all = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        for point in points {
            writer.write_f32::<LittleEndian>(point.x)?;
            writer.write_f32::<LittleEndian>(point.y)?;
            writer.write_f32::<LittleEndian>(point.z)?;
            writer.write_f32::<LittleEndian>(point.intensity)?;
        }
        writer.flush()
    };
    write_all(&mut writer).map_err(|e| ConvertError::io(path, e))
}

/// Read a `.bin` file back into points. Trailing bytes that do not fill a
/// whole row are an error.
pub fn read_bin(path: &Path) -> Result<Vec<PointRecord>> {
    let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
    let len = file.metadata().map_err(|e| ConvertError::io(path, e))?.len() as usize;
    if len % BIN_RECORD_SIZE != 0 {
        return Err(ConvertError::io(
            path,
            std::io::Error::new(
                ErrorKind::InvalidData,
                format!("size {} is not a multiple of {}", len, BIN_RECORD_SIZE),
            ),
        ));
    }

    let mut reader = BufReader::new(file);
    let mut read_row = || -> std::io::Result<PointRecord> {
        Ok(PointRecord {
            x: reader.read_f32::<LittleEndian>()?,
            y: reader.read_f32::<LittleEndian>()?,
            z: reader.read_f32::<LittleEndian>()?,
            intensity: reader.read_f32::<LittleEndian>()?,
        })
    };

    (0..len / BIN_RECORD_SIZE)
        .map(|_| read_row().map_err(|e| ConvertError::io(path, e)))
        .collect()
}

/// Convert one PCD file into one `.bin` file.
///
/// A cloud that cannot be decoded is replaced by a single zero point so the
/// output index sequence stays aligned with the labels. Only a failure to
/// write `dst` is returned as an error.
pub fn convert_point_cloud(src: &Path, dst: &Path, intensity_scale: f32) -> Result<EncodeOutcome> {
    let (points, placeholder) = match decode_point_cloud(src) {
        Ok(cloud) => (encode_points(&cloud, intensity_scale), false),
        Err(e) => {
            error!("Error processing PCD file {}: {}", src.display(), e);
            (vec![PointRecord::default()], true)
        }
    };

    write_bin(dst, &points)?;
    debug!("Wrote {} points to {}", points.len(), dst.display());

    Ok(EncodeOutcome {
        points_written: points.len(),
        placeholder,
    })
}
