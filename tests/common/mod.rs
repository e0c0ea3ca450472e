#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Build an ASCII PCD document. `fields` is `(name, type, size)`.
pub fn ascii_pcd(fields: &[(&str, char, usize)], rows: &[&str]) -> String {
    let names: Vec<&str> = fields.iter().map(|(name, _, _)| *name).collect();
    let types: Vec<String> = fields.iter().map(|(_, ty, _)| ty.to_string()).collect();
    let sizes: Vec<String> = fields.iter().map(|(_, _, size)| size.to_string()).collect();
    let counts: Vec<&str> = fields.iter().map(|_| "1").collect();

    let mut text = String::new();
    text.push_str("# .PCD v0.7 - Point Cloud Data file format\n");
    text.push_str("VERSION 0.7\n");
    text.push_str(&format!("FIELDS {}\n", names.join(" ")));
    text.push_str(&format!("SIZE {}\n", sizes.join(" ")));
    text.push_str(&format!("TYPE {}\n", types.join(" ")));
    text.push_str(&format!("COUNT {}\n", counts.join(" ")));
    text.push_str(&format!("WIDTH {}\n", rows.len()));
    text.push_str("HEIGHT 1\n");
    text.push_str("VIEWPOINT 0 0 0 1 0 0 0\n");
    text.push_str(&format!("POINTS {}\n", rows.len()));
    text.push_str("DATA ascii\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

pub fn write_xyz_pcd(path: &Path, rows: &[&str]) {
    fs::write(
        path,
        ascii_pcd(&[("x", 'F', 4), ("y", 'F', 4), ("z", 'F', 4)], rows),
    )
    .unwrap();
}

pub fn write_intensity_pcd(path: &Path, rows: &[&str]) {
    fs::write(
        path,
        ascii_pcd(
            &[("x", 'F', 4), ("y", 'F', 4), ("z", 'F', 4), ("intensity", 'F', 4)],
            rows,
        ),
    )
    .unwrap();
}

/// `rgb` holds PCL packed `0x00RRGGBB` values written as unsigned integers.
pub fn write_rgb_pcd(path: &Path, rows: &[&str]) {
    fs::write(
        path,
        ascii_pcd(
            &[("x", 'F', 4), ("y", 'F', 4), ("z", 'F', 4), ("rgb", 'U', 4)],
            rows,
        ),
    )
    .unwrap();
}

/// Annotation JSON with the given categories and one item holding `cuboids`.
pub fn annotation_json(categories: &[&str], cuboids: &str) -> String {
    let labels: Vec<String> = categories
        .iter()
        .enumerate()
        .map(|(id, name)| format!(r#"{{"id": {}, "name": "{}"}}"#, id, name))
        .collect();
    format!(
        r#"{{
  "info": {{}},
  "categories": {{ "label": {{ "labels": [{}] }} }},
  "items": [ {{ "id": "frame_0", "annotations": [{}] }} ]
}}"#,
        labels.join(", "),
        cuboids
    )
}

pub fn cuboid(label_id: i64, position: [f64; 3], rotation: [f64; 3], scale: [f64; 3]) -> String {
    format!(
        r#"{{"type": "cuboid_3d", "label_id": {}, "position": {:?}, "rotation": {:?}, "scale": {:?}}}"#,
        label_id, position, rotation, scale
    )
}

pub fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}
