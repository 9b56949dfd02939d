// SPDX-License-Identifier: GPL-3.0-only

//! CLI commands for dataset operations
//!
//! This module provides command-line functionality for:
//! - Rendering TOF records as PNG images
//! - Evaluating predicted disparity against ground truth
//! - Inspecting frame records
//! - Exporting point cloud records as LAS

use crate::RecordKind;
use depthset::config::EvaluationSettings;
use depthset::constants::file_formats;
use depthset::depth::evaluate as evaluate_depth;
use depthset::export::export_point_cloud_las;
use depthset::images::load_disparity_map;
use depthset::raster::{RasterOptions, convert_tof_file};
use depthset::records::{PointCloudFrame, TofFrame, list_records};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Convert every TOF record in `dataset_dir` to a PNG beside it
///
/// A record that fails is reported and skipped. The command fails only when
/// the directory cannot be listed or every record failed.
pub fn tof_to_png(
    dataset_dir: &Path,
    options: &RasterOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = list_records(dataset_dir)?;
    if records.is_empty() {
        println!("No records found in {}", dataset_dir.display());
        return Ok(());
    }

    println!(
        "Encoding: {} (radius {})",
        options.method.display_name(),
        options.point_radius
    );

    let mut converted = 0usize;
    let mut failed = 0usize;

    for input in &records {
        let output = input.with_extension(file_formats::IMAGE_EXTENSION);
        println!("Converting file: {}", input.display());
        println!("Into: {}", output.display());

        match convert_tof_file(input, &output, options) {
            Ok(points) => {
                converted += 1;
                info!(path = %output.display(), points, "Frame written");
            }
            Err(e) => {
                failed += 1;
                warn!(path = %input.display(), error = %e, "Frame skipped");
                eprintln!("Failed to convert {}: {}", input.display(), e);
            }
        }
    }

    println!();
    println!("Converted: {}, failed: {}", converted, failed);

    if converted == 0 {
        return Err(format!("No record in {} could be converted", dataset_dir.display()).into());
    }
    Ok(())
}

/// Align a predicted disparity map to ground-truth depth and print the errors
pub fn evaluate(
    prediction: &Path,
    ground_truth: &Path,
    settings: &EvaluationSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let prediction_map = load_disparity_map(prediction, settings.disparity_scale)?;
    let target_map = load_disparity_map(ground_truth, settings.disparity_scale)?;

    let report = evaluate_depth(&prediction_map, &target_map, settings.max_depth)?;

    println!("Prediction: {}", prediction.display());
    println!("Ground truth: {}", ground_truth.display());
    println!("Valid pixels: {}", report.valid_pixels);
    println!("Scale: {}", report.alignment.scale);
    println!("Shift: {}", report.alignment.shift);

    match report.metrics {
        Some(m) => {
            println!();
            println!("  abs_rel: {:.6}", m.abs_rel);
            println!("  sq_rel: {:.6}", m.sq_rel);
            println!("  rmse: {:.6}", m.rmse);
            println!("  rmse_log: {:.6}", m.rmse_log);
            println!("  delta < 1.25: {:.6}", m.delta1);
            println!("  delta < 1.25^2: {:.6}", m.delta2);
            println!("  delta < 1.25^3: {:.6}", m.delta3);
        }
        None => println!("No valid pixels, metrics skipped"),
    }

    Ok(())
}

/// Print the summary of a frame record
pub fn inspect(
    record: &Path,
    kind: Option<RecordKind>,
    with_points: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match kind {
        Some(kind) => kind,
        None => detect_kind(record)?,
    };

    let summary = match kind {
        RecordKind::Tof => TofFrame::from_path(record)?.summary(with_points),
        RecordKind::Points => PointCloudFrame::from_path(record)?.summary(with_points),
    };
    print!("{}", summary);
    Ok(())
}

/// Point cloud records carry `visiblePoints`, TOF records do not
fn detect_kind(record: &Path) -> Result<RecordKind, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(record)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    if value.get("visiblePoints").is_some() {
        Ok(RecordKind::Points)
    } else {
        Ok(RecordKind::Tof)
    }
}

/// Export a point cloud record as LAS
pub fn export_las(
    record: &Path,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let frame = PointCloudFrame::from_path(record)?;
    let output =
        output.unwrap_or_else(|| record.with_extension(file_formats::POINT_CLOUD_EXTENSION));

    let count = export_point_cloud_las(&frame, &output)?;
    println!("Exported {} points: {}", count, output.display());
    Ok(())
}
