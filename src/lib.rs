//! PCD + JSON cuboid labels to KITTI-style converter
//!
//! This library turns a directory of `.pcd` point clouds and their JSON
//! annotation files into numbered `lidar/NNNNNN.bin` + `label/NNNNNN.txt`
//! pairs for 3D object-detection training.

pub mod annotation;
pub mod categories;
pub mod config;
pub mod error;
pub mod io;
pub mod label;
pub mod pairing;
pub mod point_cloud;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use categories::{extract_categories, CategoryTable};
pub use config::Args;
pub use error::ConvertError;
pub use pairing::{annotation_file_name, run};
pub use types::{BoxRecord, ConversionStats, OutputDirs, PointRecord, UNKNOWN_CLASS};
