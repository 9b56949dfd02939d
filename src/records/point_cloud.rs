// SPDX-License-Identifier: GPL-3.0-only

use super::{Point, Pose, SensorData, drop_missing, ensure_frame_size, parse_json, read_record};
use crate::errors::{AppResult, RecordError};
use serde::Deserialize;
use std::fmt::Write;
use std::path::Path;

/// ARCore point cloud frame with camera state and IMU readings
#[derive(Debug, Clone, PartialEq)]
pub struct PointCloudFrame {
    /// Physical camera pose
    pub camera_pose: Pose,
    /// Virtual camera pose, rotated with the display
    pub camera_display_pose: Pose,
    /// Physical sensor pose
    pub sensor_pose: Pose,
    pub display_rotation: i32,
    /// Nanoseconds
    pub point_cloud_timestamp: i64,
    /// Points that projected inside the screen
    pub visible_points: Vec<Point>,
    pub min_distance: f64,
    pub max_distance: f64,
    pub origin: String,
    /// Points in the ARCore cloud, as recorded
    pub num_points: u64,
    /// Points on screen, as recorded
    pub num_visible_points: u64,
    pub width: u32,
    pub height: u32,
    pub near_plane: f64,
    pub far_plane: f64,
    /// Column-major 4x4 view matrix
    pub viewmtx: Vec<f64>,
    /// Column-major 4x4 projection matrix
    pub projmtx: Vec<f64>,
    pub accelerometer_data: Option<SensorData>,
    pub linear_accelerometer_data: Option<SensorData>,
    pub gyroscope_data: Option<SensorData>,
    pub pose_6dof_data: Option<SensorData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPointCloudFrame {
    camera_pose: Pose,
    camera_display_pose: Pose,
    sensor_pose: Pose,
    display_rotation: i32,
    point_cloud_timestamp: i64,
    visible_points: Vec<Option<Point>>,
    min_distance: f64,
    max_distance: f64,
    origin: String,
    num_points: u64,
    num_visible_points: u64,
    width: u32,
    height: u32,
    near_plane: f64,
    far_plane: f64,
    viewmtx: Vec<f64>,
    projmtx: Vec<f64>,
    #[serde(default)]
    accelerometer_data: Option<SensorData>,
    #[serde(default)]
    linear_accelerometer_data: Option<SensorData>,
    #[serde(default)]
    gyroscope_data: Option<SensorData>,
    #[serde(default, rename = "pose6DofData")]
    pose_6dof_data: Option<SensorData>,
}

impl TryFrom<RawPointCloudFrame> for PointCloudFrame {
    type Error = RecordError;

    fn try_from(raw: RawPointCloudFrame) -> Result<Self, Self::Error> {
        ensure_frame_size(raw.width, raw.height)?;
        for (field, matrix) in [("viewmtx", &raw.viewmtx), ("projmtx", &raw.projmtx)] {
            if matrix.len() != 16 {
                return Err(RecordError::InvalidValue {
                    field,
                    reason: format!("expected 16 values, got {}", matrix.len()),
                });
            }
        }

        Ok(Self {
            camera_pose: raw.camera_pose,
            camera_display_pose: raw.camera_display_pose,
            sensor_pose: raw.sensor_pose,
            display_rotation: raw.display_rotation,
            point_cloud_timestamp: raw.point_cloud_timestamp,
            visible_points: drop_missing(raw.visible_points),
            min_distance: raw.min_distance,
            max_distance: raw.max_distance,
            origin: raw.origin,
            num_points: raw.num_points,
            num_visible_points: raw.num_visible_points,
            width: raw.width,
            height: raw.height,
            near_plane: raw.near_plane,
            far_plane: raw.far_plane,
            viewmtx: raw.viewmtx,
            projmtx: raw.projmtx,
            accelerometer_data: raw.accelerometer_data,
            linear_accelerometer_data: raw.linear_accelerometer_data,
            gyroscope_data: raw.gyroscope_data,
            pose_6dof_data: raw.pose_6dof_data,
        })
    }
}

impl PointCloudFrame {
    pub fn from_json_str(json: &str) -> Result<Self, RecordError> {
        Self::try_from(parse_json::<RawPointCloudFrame>(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        read_record::<Self, RawPointCloudFrame>(path.as_ref())
    }

    /// Sensor readings that were recorded, in a fixed order
    pub fn sensors(&self) -> impl Iterator<Item = &SensorData> {
        [
            &self.accelerometer_data,
            &self.linear_accelerometer_data,
            &self.gyroscope_data,
            &self.pose_6dof_data,
        ]
        .into_iter()
        .flatten()
    }

    /// Human-readable description, optionally listing every point
    pub fn summary(&self, with_points: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Point cloud frame");
        let _ = writeln!(out, "  display rotation: {}", self.display_rotation);
        let _ = writeln!(out, "  timestamp (ns): {}", self.point_cloud_timestamp);
        let _ = writeln!(out, "  recorded points: {}", self.num_points);
        let _ = writeln!(out, "  visible points: {}", self.num_visible_points);
        let _ = writeln!(out, "  nearest point (m): {}", self.min_distance);
        let _ = writeln!(out, "  farthest point (m): {}", self.max_distance);
        let _ = writeln!(out, "  XY origin: {}", self.origin);
        let _ = writeln!(out, "  frame size (px): {}x{}", self.width, self.height);
        let _ = writeln!(
            out,
            "  clip planes: near={} far={}",
            self.near_plane, self.far_plane
        );

        self.camera_pose.describe("camera", &mut out);
        self.camera_display_pose.describe("camera (display-oriented)", &mut out);
        self.sensor_pose.describe("sensor", &mut out);

        if with_points {
            let _ = writeln!(out, "Points:");
            for point in &self.visible_points {
                point.describe(&mut out);
            }
        }

        for sensor in self.sensors() {
            sensor.describe(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> String {
        let pose = r#"{"tx": 0.0, "ty": 1.0, "tz": 0.0, "qx": 0.0, "qy": 0.0, "qz": 0.0, "qw": 1.0}"#;
        let identity = "[1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]";
        format!(
            r#"{{
                "cameraPose": {pose},
                "cameraDisplayPose": {pose},
                "sensorPose": {pose},
                "displayRotation": 0,
                "pointCloudTimestamp": 987654321,
                "visiblePoints": [
                    {{"x": 5, "y": 6, "tx": 0.1, "ty": 0.9, "tz": -1.5, "confidence": 0.7, "distance": 1.5}},
                    null
                ],
                "minDistance": 1.5,
                "maxDistance": 1.5,
                "origin": "left-top",
                "numPoints": 4,
                "numVisiblePoints": 1,
                "width": 64,
                "height": 48,
                "nearPlane": 0.1,
                "farPlane": 100.0,
                "viewmtx": {identity},
                "projmtx": {identity},
                "gyroscopeData": {{"sensorName": "gyro", "id": 0, "timestamp": 1, "accuracy": 3, "data": [0.0, 0.1, 0.2]}}
            }}"#
        )
    }

    #[test]
    fn test_optional_sensors() {
        let frame = PointCloudFrame::from_json_str(&sample_json()).unwrap();
        assert!(frame.accelerometer_data.is_none());
        assert!(frame.pose_6dof_data.is_none());
        assert_eq!(frame.gyroscope_data.as_ref().unwrap().sensor_name, "gyro");
        assert_eq!(frame.sensors().count(), 1);
    }

    #[test]
    fn test_recorded_counts_kept() {
        let frame = PointCloudFrame::from_json_str(&sample_json()).unwrap();
        assert_eq!(frame.visible_points.len(), 1);
        assert_eq!(frame.num_points, 4);
        assert_eq!(frame.num_visible_points, 1);
    }

    #[test]
    fn test_pose_6dof_key() {
        let json = sample_json().replace(
            "\"gyroscopeData\"",
            "\"pose6DofData\": {\"sensorName\": \"6dof\", \"id\": 0, \"timestamp\": 1, \"accuracy\": 3, \"data\": []}, \"gyroscopeData\"",
        );
        let frame = PointCloudFrame::from_json_str(&json).unwrap();
        assert_eq!(frame.pose_6dof_data.unwrap().sensor_name, "6dof");
    }

    #[test]
    fn test_missing_pose_is_malformed() {
        let json = sample_json().replacen("\"sensorPose\"", "\"otherPose\"", 1);
        assert!(PointCloudFrame::from_json_str(&json).is_err());
    }

    #[test]
    fn test_short_matrix_rejected() {
        let json = sample_json().replacen("[1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]", "[1,0]", 1);
        assert!(matches!(
            PointCloudFrame::from_json_str(&json),
            Err(RecordError::InvalidValue {
                field: "viewmtx",
                ..
            })
        ));
    }

    #[test]
    fn test_summary_includes_sensors() {
        let frame = PointCloudFrame::from_json_str(&sample_json()).unwrap();
        let summary = frame.summary(true);
        assert!(summary.contains("Sensor: gyro"));
        assert!(summary.contains("visible points: 1"));
    }
}
