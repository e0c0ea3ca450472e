//! KITTI-style label text.
//!
//! Line layout:
//! `type truncated occluded alpha x1 y1 x2 y2 h w l X Y Z rotation_y`
//!
//! Point clouds carry no camera view, so the 2D box and the
//! truncation/occlusion/alpha columns are fixed placeholders.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::types::{BoxRecord, UNKNOWN_CLASS};

pub const LABEL_FIELD_COUNT: usize = 15;

// truncated occluded alpha x1 y1 x2 y2
const PLACEHOLDER_COLUMNS: &str = "0 0 0 0 0 50 50";

/// Format one box as a label line (newline-terminated).
pub fn format_label_line(record: &BoxRecord) -> String {
    format!(
        "{} {} {:.2} {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}\n",
        record.class_name,
        PLACEHOLDER_COLUMNS,
        record.height,
        record.width,
        record.length,
        record.center_x,
        record.center_y,
        record.center_z,
        record.yaw
    )
}

/// Render a whole label file in memory
pub fn format_labels(records: &[BoxRecord]) -> String {
    let mut text = String::with_capacity(records.len() * 64);
    for record in records {
        text.push_str(&format_label_line(record));
    }
    text
}

/// Write the label file; an empty slice produces an empty file.
pub fn write_label_file(path: &Path, records: &[BoxRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_labels(records).as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ConvertError::io(path, e))
}

/// Parse a label line back into a box. Returns `None` for lines that do not
/// have exactly 15 columns or whose numeric columns do not parse. A line
/// carrying the `Unknown` placeholder class comes back unresolved.
pub fn parse_label_line(line: &str) -> Option<BoxRecord> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() != LABEL_FIELD_COUNT {
        return None;
    }

    let mut numbers = [0.0f64; 7];
    for (slot, column) in numbers.iter_mut().zip(&columns[8..]) {
        *slot = column.parse().ok()?;
    }
    let [height, width, length, center_x, center_y, center_z, yaw] = numbers;

    Some(BoxRecord {
        class_name: columns[0].to_string(),
        height,
        width,
        length,
        center_x,
        center_y,
        center_z,
        yaw,
        resolved: columns[0] != UNKNOWN_CLASS,
    })
}
