use std::path::Path;

use crate::categories::CategoryTable;
use crate::error::Result;
use crate::types::{AnnotationFile, BoxRecord, CuboidAnnotation, UNKNOWN_CLASS};
use crate::utils::read_json;

/// Map one cuboid to KITTI field order.
///
/// `scale` is stored as `[length, width, height]`; KITTI wants
/// `height width length`. Yaw is the rotation about z.
pub fn to_box_record(cuboid: &CuboidAnnotation, categories: &CategoryTable) -> BoxRecord {
    let [length, width, height] = cuboid.scale;
    let [center_x, center_y, center_z] = cuboid.position;
    let resolved = categories.resolve(cuboid.label_id);

    BoxRecord {
        class_name: resolved.unwrap_or(UNKNOWN_CLASS).to_string(),
        height,
        width,
        length,
        center_x,
        center_y,
        center_z,
        yaw: cuboid.rotation[2],
        resolved: resolved.is_some(),
    }
}

/// Flatten every item's cuboids into box records, keeping file order.
pub fn translate_annotation(annotation: &AnnotationFile, categories: &CategoryTable) -> Vec<BoxRecord> {
    annotation
        .items
        .iter()
        .flat_map(|item| item.annotations.iter())
        .map(|cuboid| to_box_record(cuboid, categories))
        .collect()
}

/// Read one annotation file and translate it.
pub fn parse_annotation_file(path: &Path, categories: &CategoryTable) -> Result<Vec<BoxRecord>> {
    let annotation: AnnotationFile = read_json(path)?;
    Ok(translate_annotation(&annotation, categories))
}
