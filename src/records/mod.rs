// SPDX-License-Identifier: GPL-3.0-only

//! Frame records dumped by the ARCore capture apps
//!
//! Each recorded frame is one JSON document. Two layouts exist:
//! - [`TofFrame`]: time-of-flight depth samples projected to screen pixels
//! - [`PointCloudFrame`]: ARCore feature points with poses, matrices and
//!   optional IMU readings
//!
//! Point arrays may contain `null` placeholders for points that were not
//! visible; those are dropped on load.

mod point_cloud;
mod tof;

pub use point_cloud::PointCloudFrame;
pub use tof::TofFrame;

use crate::constants::{MAX_FRAME_PIXELS, file_formats};
use crate::errors::{AppResult, RecordError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Position and orientation in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
    pub qw: f64,
}

/// One sample, in both screen pixels and camera-pose coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Screen column relative to the frame origin
    pub x: i64,
    /// Screen row relative to the frame origin
    pub y: i64,
    pub tx: f64,
    pub ty: f64,
    pub tz: f64,
    /// ARCore confidence in `[0, 1]`
    pub confidence: f64,
    /// Distance from the camera (meters)
    pub distance: f64,
}

/// Raw reading of one Android motion sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorData {
    pub sensor_name: String,
    pub id: i64,
    /// Nanoseconds
    pub timestamp: i64,
    pub accuracy: i64,
    pub data: Vec<f64>,
}

impl Pose {
    fn describe(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "Pose: {}", name);
        let _ = writeln!(
            out,
            "  translation (x, y, z): {}, {}, {}",
            self.tx, self.ty, self.tz
        );
        let _ = writeln!(
            out,
            "  rotation (x, y, z, w): {}, {}, {}, {}",
            self.qx, self.qy, self.qz, self.qw
        );
    }
}

impl Point {
    fn describe(&self, out: &mut String) {
        let _ = writeln!(
            out,
            "  ({}, {}) t=({}, {}, {}) confidence={} distance={}",
            self.x, self.y, self.tx, self.ty, self.tz, self.confidence, self.distance
        );
    }
}

impl SensorData {
    fn describe(&self, out: &mut String) {
        let _ = writeln!(out, "Sensor: {} (id {})", self.sensor_name, self.id);
        let _ = writeln!(out, "  timestamp (ns): {}", self.timestamp);
        let _ = writeln!(out, "  accuracy: {}", self.accuracy);
        let _ = writeln!(out, "  data: {:?}", self.data);
    }
}

/// Parse `json` as `T`, mapping failures to [`RecordError`]
fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, RecordError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse one record file
fn read_record<T, R>(path: &Path) -> AppResult<T>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError>,
{
    let json = std::fs::read_to_string(path)?;
    let raw: R = parse_json(&json)?;
    let record = T::try_from(raw)?;
    debug!(path = %path.display(), "Record loaded");
    Ok(record)
}

/// Frame records in `dir`, sorted by file name
pub fn list_records(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut records: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(file_formats::is_record_extension)
        })
        .collect();
    records.sort();
    debug!(dir = %dir.display(), count = records.len(), "Records listed");
    Ok(records)
}

/// Keep the non-null entries, in order
fn drop_missing(points: Vec<Option<Point>>) -> Vec<Point> {
    points.into_iter().flatten().collect()
}

fn ensure_frame_size(width: u32, height: u32) -> Result<(), RecordError> {
    if width == 0 || height == 0 {
        return Err(RecordError::InvalidValue {
            field: "width/height",
            reason: format!("frame size {}x{} is empty", width, height),
        });
    }
    match (width as u64).checked_mul(height as u64) {
        Some(pixels) if pixels <= MAX_FRAME_PIXELS => Ok(()),
        _ => Err(RecordError::InvalidValue {
            field: "width/height",
            reason: format!(
                "frame size {}x{} exceeds {} pixels",
                width, height, MAX_FRAME_PIXELS
            ),
        }),
    }
}
