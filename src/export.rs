// SPDX-License-Identifier: GPL-3.0-only

//! LAS point cloud export
//!
//! Writes the visible points of a point cloud frame in world coordinates,
//! coloured with the plasma encoding of their distance.

use crate::encoding::{EncodingMethod, encode};
use crate::errors::{AppError, AppResult};
use crate::records::PointCloudFrame;
use las::{Builder, Color, Point, Writer};
use std::path::Path;
use tracing::{debug, info};

/// Coordinate precision of the exported file (meters)
const LAS_SCALE: f64 = 0.001;

/// Export the visible points of `frame` as an uncompressed LAS 1.4 file
pub fn export_point_cloud_las(frame: &PointCloudFrame, output_path: &Path) -> AppResult<usize> {
    let mut points: Vec<(f64, f64, f64, u16, u16, u16)> =
        Vec::with_capacity(frame.visible_points.len());

    for point in &frame.visible_points {
        let pixel = encode(
            point.distance,
            frame.max_distance,
            EncodingMethod::ColormapNormalized,
        )?;
        points.push((
            point.tx,
            point.ty,
            point.tz,
            pixel.r() as u16 * 256,
            pixel.g() as u16 * 256,
            pixel.b() as u16 * 256,
        ));
    }

    if points.is_empty() {
        return Err(AppError::Export("No visible points to export".to_string()));
    }

    info!(
        point_count = points.len(),
        path = %output_path.display(),
        "Exporting point cloud"
    );

    let (min_x, max_x) = bounds(points.iter().map(|p| p.0));
    let (min_y, max_y) = bounds(points.iter().map(|p| p.1));
    let (min_z, max_z) = bounds(points.iter().map(|p| p.2));

    let mut builder = Builder::from((1, 4)); // LAS 1.4
    builder.point_format.has_color = true;
    builder.point_format.is_compressed = false;

    builder.transforms = las::Vector {
        x: las::Transform {
            scale: LAS_SCALE,
            offset: (min_x + max_x) / 2.0,
        },
        y: las::Transform {
            scale: LAS_SCALE,
            offset: (min_y + max_y) / 2.0,
        },
        z: las::Transform {
            scale: LAS_SCALE,
            offset: (min_z + max_z) / 2.0,
        },
    };

    let header = builder.into_header()?;
    let mut writer = Writer::from_path(output_path, header)?;

    let count = points.len();
    for (px, py, pz, r, g, b) in points {
        let mut point = Point::default();
        point.x = px;
        point.y = py;
        point.z = pz;
        point.color = Some(Color::new(r, g, b));
        writer.write_point(point)?;
    }

    writer.close()?;

    debug!(path = %output_path.display(), "LAS export complete");

    Ok(count)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::MAX, f64::MIN), |(min, max), v| (min.min(v), max.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(bounds([3.0, -1.0, 2.0].into_iter()), (-1.0, 3.0));
    }
}
