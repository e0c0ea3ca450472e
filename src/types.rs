use serde::{de, Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

// Input file extensions
pub const PCD_EXTENSION: &str = "pcd";
pub const ANNOTATION_EXTENSION: &str = "json";

// Output subdirectories under out_dir
pub const LIDAR_DIR_NAME: &str = "lidar";
pub const LABEL_DIR_NAME: &str = "label";

// Class name written when a label id has no entry in the category table
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Format a pair index as the shared six digit file stem (`000042`).
pub fn pair_stem(index: usize) -> String {
    format!("{:06}", index)
}

// One labelled cuboid inside an annotation item.
// Field defaults mirror what the labelling tool omits for untouched boxes.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CuboidAnnotation {
    #[serde(default = "default_label_id")]
    pub label_id: i64,
    #[serde(default, deserialize_with = "first_three")]
    pub position: [f64; 3],
    #[serde(default, deserialize_with = "first_three")]
    pub rotation: [f64; 3],
    /// `[length, width, height]`
    #[serde(default = "default_scale", deserialize_with = "first_three")]
    pub scale: [f64; 3],
}

// Vectors may carry extra trailing components; only x, y, z are used
fn first_three<'de, D>(deserializer: D) -> Result<[f64; 3], D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<f64>::deserialize(deserializer)?;
    match values[..] {
        [x, y, z, ..] => Ok([x, y, z]),
        _ => Err(de::Error::invalid_length(
            values.len(),
            &"at least 3 components",
        )),
    }
}

fn default_label_id() -> i64 {
    -1
}

fn default_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

// An annotated frame; only the cuboid list matters for conversion
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AnnotationItem {
    #[serde(default)]
    pub annotations: Vec<CuboidAnnotation>,
}

// Top level of an annotation file as far as box translation is concerned
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnnotationFile {
    pub items: Vec<AnnotationItem>,
}

// `categories.label.labels[*].name` inside an annotation file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategoryFile {
    pub categories: CategorySection,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CategorySection {
    pub label: LabelSection,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabelSection {
    pub labels: Vec<LabelEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LabelEntry {
    pub name: String,
}

/// A 3D oriented box in KITTI field order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRecord {
    pub class_name: String,
    pub height: f64,
    pub width: f64,
    pub length: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub center_z: f64,
    pub yaw: f64,
    /// Whether the label id was found in the category table. A table may
    /// itself contain a class called `Unknown`, so the name alone is not enough.
    pub resolved: bool,
}

impl BoxRecord {
    pub fn is_unknown(&self) -> bool {
        !self.resolved
    }
}

/// One row of the `.bin` output.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

// Paths of the two output trees
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub lidar_dir: PathBuf,
    pub label_dir: PathBuf,
}

impl OutputDirs {
    pub fn new(out_dir: &Path) -> Self {
        Self {
            lidar_dir: out_dir.join(LIDAR_DIR_NAME),
            label_dir: out_dir.join(LABEL_DIR_NAME),
        }
    }

    pub fn bin_path(&self, index: usize) -> PathBuf {
        self.lidar_dir.join(pair_stem(index)).with_extension("bin")
    }

    pub fn label_path(&self, index: usize) -> PathBuf {
        self.label_dir.join(pair_stem(index)).with_extension("txt")
    }
}

// Struct to hold conversion statistics
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConversionStats {
    pub pairs_converted: usize,
    pub points_written: usize,
    pub pcd_failures: usize,
    pub missing_annotations: usize,
    pub annotation_failures: usize,
    pub boxes_written: usize,
    pub unknown_boxes: usize,
    pub dropped_boxes: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_summary(&self) {
        log::info!("=== Conversion Summary ===");
        log::info!("Pairs converted: {}", self.pairs_converted);
        log::info!("Points written: {}", self.points_written);
        log::info!("Boxes written: {}", self.boxes_written);
        log::info!("Point clouds replaced by placeholder: {}", self.pcd_failures);
        log::info!("Missing annotation files: {}", self.missing_annotations);
        log::info!("Unreadable annotation files: {}", self.annotation_failures);

        if self.unknown_boxes > 0 {
            log::warn!(
                "Boxes with unresolved label id: {} (dropped: {})",
                self.unknown_boxes,
                self.dropped_boxes
            );
        }
    }
}
