use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_INTENSITY_SCALE: f32 = 256.0;
pub const DEFAULT_PCD_SUFFIX: &str = "_IMG";
pub const DEFAULT_LABEL_SUFFIX: &str = "_CUB";

/// Convert PCD point clouds + JSON cuboid labels into KITTI-style BIN + TXT pairs.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory containing .pcd files
    #[arg(long = "pcd_path")]
    pub pcd_path: PathBuf,

    /// Directory containing .json label files
    #[arg(long = "json_path")]
    pub json_path: PathBuf,

    /// Output directory; lidar/ and label/ are created inside it
    #[arg(long = "out_dir")]
    pub out_dir: PathBuf,

    /// Multiplier applied to the color/intensity channel of each point
    #[arg(long = "intensity_scale", default_value_t = DEFAULT_INTENSITY_SCALE, value_parser = validate_scale)]
    pub intensity_scale: f32,

    /// Ordered category names overriding the ones found in the sample JSON
    #[arg(long = "label_list", value_delimiter = ',')]
    pub label_list: Vec<String>,

    /// Drop boxes whose label id has no category instead of writing "Unknown"
    #[arg(long = "drop_unknown")]
    pub drop_unknown: bool,

    /// Marker stripped from the end of point-cloud file stems
    #[arg(long = "pcd_suffix", default_value = DEFAULT_PCD_SUFFIX)]
    pub pcd_suffix: String,

    /// Marker appended to the stem to form the label file name
    #[arg(long = "label_suffix", default_value = DEFAULT_LABEL_SUFFIX)]
    pub label_suffix: String,

    /// Hide the progress bar
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Arguments with every optional setting at its default
    pub fn new(
        pcd_path: impl Into<PathBuf>,
        json_path: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            pcd_path: pcd_path.into(),
            json_path: json_path.into(),
            out_dir: out_dir.into(),
            intensity_scale: DEFAULT_INTENSITY_SCALE,
            label_list: Vec::new(),
            drop_unknown: false,
            pcd_suffix: DEFAULT_PCD_SUFFIX.to_string(),
            label_suffix: DEFAULT_LABEL_SUFFIX.to_string(),
            quiet: false,
        }
    }
}

// The scale must be a finite number
pub fn validate_scale(s: &str) -> Result<f32, String> {
    match f32::from_str(s) {
        Ok(val) if val.is_finite() => Ok(val),
        _ => Err("SCALE must be a finite number".to_string()),
    }
}
