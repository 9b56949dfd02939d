// SPDX-License-Identifier: GPL-3.0-only

//! Loading disparity and depth rasters

use crate::depth::DepthMap;
use crate::errors::{AppError, AppResult};
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// Read a single-channel raster and divide its stored integers by `scale`
///
/// 8-bit and 16-bit grayscale images keep their raw values; any other layout
/// is converted to 16-bit luma first.
pub fn load_disparity_map(path: &Path, scale: f64) -> AppResult<DepthMap> {
    if scale.is_nan() || scale <= 0.0 {
        return Err(AppError::Config(format!(
            "disparity scale must be positive, got {}",
            scale
        )));
    }

    let image = image::open(path)?;
    let map = depth_map_from_image(&image, scale)?;
    debug!(
        path = %path.display(),
        width = map.width(),
        height = map.height(),
        "Disparity map loaded"
    );
    Ok(map)
}

/// Convert an in-memory raster, dividing raw values by `scale`
pub fn depth_map_from_image(image: &DynamicImage, scale: f64) -> AppResult<DepthMap> {
    let (width, height) = (image.width() as usize, image.height() as usize);

    let samples: Vec<f64> = match image {
        DynamicImage::ImageLuma8(gray) => gray.as_raw().iter().map(|&v| v as f64 / scale).collect(),
        DynamicImage::ImageLuma16(gray) => {
            gray.as_raw().iter().map(|&v| v as f64 / scale).collect()
        }
        other => other
            .to_luma16()
            .as_raw()
            .iter()
            .map(|&v| v as f64 / scale)
            .collect(),
    };

    Ok(DepthMap::new(width, height, samples)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::DISPARITY_SCALE;
    use image::{GrayImage, ImageBuffer, Luma};

    #[test]
    fn test_sixteen_bit_raw_values() {
        let gray: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 1, vec![512u16, 65535]).unwrap();
        let map = depth_map_from_image(&DynamicImage::ImageLuma16(gray), DISPARITY_SCALE).unwrap();
        assert_eq!(map.dimensions(), (2, 1));
        assert_eq!(map.samples(), &[2.0, 65535.0 / 256.0]);
    }

    #[test]
    fn test_eight_bit_not_widened() {
        let gray = GrayImage::from_raw(1, 1, vec![128u8]).unwrap();
        let map = depth_map_from_image(&DynamicImage::ImageLuma8(gray), DISPARITY_SCALE).unwrap();
        assert_eq!(map.samples(), &[0.5]);
    }

    #[test]
    fn test_png_round_trip() {
        let path = std::env::temp_dir().join(format!("depthset_disp_{}.png", std::process::id()));
        let gray: ImageBuffer<Luma<u16>, Vec<u16>> =
            ImageBuffer::from_raw(2, 2, vec![256u16, 512, 768, 1024]).unwrap();
        gray.save(&path).unwrap();

        let map = load_disparity_map(&path, DISPARITY_SCALE).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(map.samples(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rejects_bad_scale() {
        assert!(load_disparity_map(Path::new("missing.png"), 0.0).is_err());
    }
}
