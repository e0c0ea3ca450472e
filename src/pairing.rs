use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::annotation::parse_annotation_file;
use crate::categories::{extract_categories, CategoryTable};
use crate::config::Args;
use crate::error::{ConvertError, Result};
use crate::io::{ensure_input_dir, list_files_with_extension, setup_output_directories};
use crate::label::write_label_file;
use crate::point_cloud::convert_point_cloud;
use crate::types::{
    BoxRecord, ConversionStats, OutputDirs, ANNOTATION_EXTENSION, PCD_EXTENSION,
};
use crate::utils::create_progress_bar;

/// Derive the annotation file name for a point cloud:
/// `scene_IMG.pcd` -> `scene_CUB.json` with the default markers.
pub fn annotation_file_name(pcd_file: &Path, pcd_suffix: &str, label_suffix: &str) -> String {
    let stem = pcd_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = if pcd_suffix.is_empty() {
        stem.as_str()
    } else {
        stem.strip_suffix(pcd_suffix).unwrap_or(stem.as_str())
    };
    format!("{}{}.{}", base, label_suffix, ANNOTATION_EXTENSION)
}

/// Pick the category table for the run: the explicit list when given,
/// otherwise the table found in the first annotation file.
pub fn resolve_categories(args: &Args, sample_annotation: &Path) -> CategoryTable {
    if args.label_list.is_empty() {
        extract_categories(sample_annotation)
    } else {
        let table = CategoryTable::new(args.label_list.clone());
        info!(
            "Using {} categories from --label_list: {:?}",
            table.len(),
            table.names()
        );
        table
    }
}

/// Boxes for one pair; a missing or unreadable annotation file gives none.
fn load_boxes(
    annotation_path: &Path,
    categories: &CategoryTable,
    args: &Args,
    stats: &mut ConversionStats,
) -> Vec<BoxRecord> {
    if !annotation_path.is_file() {
        warn!(
            "JSON file {} does not exist. Skipping annotations.",
            annotation_path.display()
        );
        stats.missing_annotations += 1;
        return Vec::new();
    }

    let mut boxes = match parse_annotation_file(annotation_path, categories) {
        Ok(boxes) => boxes,
        Err(e) => {
            error!("Error parsing JSON file {}: {}", annotation_path.display(), e);
            stats.annotation_failures += 1;
            return Vec::new();
        }
    };

    let unknown = boxes.iter().filter(|b| b.is_unknown()).count();
    if unknown > 0 {
        debug!(
            "{} box(es) in {} have a label id outside the category table",
            unknown,
            annotation_path.display()
        );
        stats.unknown_boxes += unknown;
        if args.drop_unknown {
            boxes.retain(|b| !b.is_unknown());
            stats.dropped_boxes += unknown;
        }
    }
    boxes
}

/// Convert the pair at `index`: the point cloud to `lidar/`, its labels to
/// `label/`. Errors are logged here so the next pair keeps its index.
pub fn convert_pair(
    index: usize,
    pcd_file: &Path,
    categories: &CategoryTable,
    dirs: &OutputDirs,
    args: &Args,
    stats: &mut ConversionStats,
) {
    let annotation_path = args.json_path.join(annotation_file_name(
        pcd_file,
        &args.pcd_suffix,
        &args.label_suffix,
    ));
    debug!(
        "Pair {:06}: {} + {}",
        index,
        pcd_file.display(),
        annotation_path.display()
    );

    match convert_point_cloud(pcd_file, &dirs.bin_path(index), args.intensity_scale) {
        Ok(outcome) => {
            stats.points_written += outcome.points_written;
            if outcome.placeholder {
                stats.pcd_failures += 1;
            }
        }
        Err(e) => {
            error!("Failed to write point cloud for pair {:06}: {}", index, e);
            stats.pcd_failures += 1;
        }
    }

    let boxes = load_boxes(&annotation_path, categories, args, stats);
    match write_label_file(&dirs.label_path(index), &boxes) {
        Ok(()) => stats.boxes_written += boxes.len(),
        Err(e) => error!("Failed to write labels for pair {:06}: {}", index, e),
    }

    stats.pairs_converted += 1;
}

fn log_settings(args: &Args) {
    info!("=== Settings ===");
    info!("pcd_path: {}", args.pcd_path.display());
    info!("json_path: {}", args.json_path.display());
    info!("out_dir: {}", args.out_dir.display());
    info!("intensity_scale: {}", args.intensity_scale);
    info!("================");
}

/// Run the whole conversion.
///
/// Aborts before writing anything when an input directory is missing or the
/// annotation directory holds no JSON files. Every other failure is confined
/// to its pair.
pub fn run(args: &Args) -> Result<ConversionStats> {
    log_settings(args);
    ensure_input_dir(&args.pcd_path)?;
    ensure_input_dir(&args.json_path)?;

    let annotation_files = list_files_with_extension(&args.json_path, ANNOTATION_EXTENSION)?;
    let sample_annotation: PathBuf = match annotation_files.first() {
        Some(path) => path.clone(),
        None => return Err(ConvertError::NoAnnotationFiles(args.json_path.clone())),
    };

    let dirs = setup_output_directories(&args.out_dir)?;
    let categories = resolve_categories(args, &sample_annotation);
    if categories.is_empty() {
        warn!("Category table is empty; every box will be labelled Unknown");
    }

    let pcd_files = list_files_with_extension(&args.pcd_path, PCD_EXTENSION)?;
    info!("Found {} PCD files.", pcd_files.len());

    let pb = create_progress_bar(pcd_files.len() as u64, "Convert", args.quiet);
    let mut stats = ConversionStats::new();
    for (index, pcd_file) in pcd_files.iter().enumerate() {
        convert_pair(index, pcd_file, &categories, &dirs, args, &mut stats);
        pb.inc(1);
    }
    pb.finish_with_message("Conversion complete");

    info!(
        "Done. Converted {} PCD files into .bin and created .txt labels.",
        stats.pairs_converted
    );
    info!(
        "Output structure is in: {}, {}",
        dirs.lidar_dir.display(),
        dirs.label_dir.display()
    );
    stats.print_summary();

    Ok(stats)
}
