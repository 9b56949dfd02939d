// SPDX-License-Identifier: GPL-3.0-only

use super::{Point, drop_missing, ensure_frame_size, parse_json, read_record};
use crate::errors::{AppResult, RecordError};
use serde::Deserialize;
use std::fmt::Write;
use std::path::Path;

/// Time-of-flight frame projected onto the screen
#[derive(Debug, Clone, PartialEq)]
pub struct TofFrame {
    /// Origin of the screen coordinates (e.g. "top-left")
    pub origin: String,
    /// Sensor timestamp (nanoseconds)
    pub tof_timestamp: i64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub width: u32,
    pub height: u32,
    pub points: Vec<Point>,
    /// Recorded count when present, otherwise `points.len()`
    pub num_points: u64,
    /// 0, 90, 180 or 270 degrees from the natural orientation
    pub display_rotation: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTofFrame {
    origin: String,
    tof_timestamp: i64,
    min_distance: f64,
    max_distance: f64,
    width: u32,
    height: u32,
    points: Vec<Option<Point>>,
    num_points: Option<u64>,
    display_rotation: i32,
}

impl TryFrom<RawTofFrame> for TofFrame {
    type Error = RecordError;

    fn try_from(raw: RawTofFrame) -> Result<Self, Self::Error> {
        ensure_frame_size(raw.width, raw.height)?;

        let points = drop_missing(raw.points);
        // The recorded count wins even when it disagrees with the array
        let num_points = raw.num_points.unwrap_or(points.len() as u64);

        Ok(Self {
            origin: raw.origin,
            tof_timestamp: raw.tof_timestamp,
            min_distance: raw.min_distance,
            max_distance: raw.max_distance,
            width: raw.width,
            height: raw.height,
            points,
            num_points,
            display_rotation: raw.display_rotation,
        })
    }
}

impl TofFrame {
    pub fn from_json_str(json: &str) -> Result<Self, RecordError> {
        Self::try_from(parse_json::<RawTofFrame>(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        read_record::<Self, RawTofFrame>(path.as_ref())
    }

    /// Human-readable description, optionally listing every point
    pub fn summary(&self, with_points: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TOF frame");
        let _ = writeln!(out, "  display rotation: {}", self.display_rotation);
        let _ = writeln!(out, "  timestamp (ns): {}", self.tof_timestamp);
        let _ = writeln!(out, "  recorded points: {}", self.num_points);
        let _ = writeln!(out, "  nearest point (m): {}", self.min_distance);
        let _ = writeln!(out, "  farthest point (m): {}", self.max_distance);
        let _ = writeln!(out, "  XY origin: {}", self.origin);
        let _ = writeln!(out, "  frame size (px): {}x{}", self.width, self.height);

        if with_points {
            let _ = writeln!(out, "Points:");
            for point in &self.points {
                point.describe(&mut out);
            }
        }
        out
    }
}
