// SPDX-License-Identifier: GPL-3.0-only

//! Rasterization of frame points into RGBA images
//!
//! Every point is encoded once and stamped as a `(2r + 1) x (2r + 1)` block
//! centered on its pixel. Writes outside the canvas are dropped and later
//! points overwrite earlier ones.

use crate::constants::MAX_FRAME_PIXELS;
use crate::encoding::{EncodedPixel, EncodingMethod, encode};
use crate::errors::{AppError, AppResult};
use crate::records::{Point, TofFrame};
use image::{ImageFormat, RgbaImage};
use std::path::Path;
use tracing::debug;

/// Default block radius around each point
pub const DEFAULT_POINT_RADIUS: u32 = 1;

/// How points are turned into pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterOptions {
    pub method: EncodingMethod,
    pub point_radius: u32,
    /// Canvas fill before any point is drawn
    pub background: EncodedPixel,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            method: EncodingMethod::default(),
            point_radius: DEFAULT_POINT_RADIUS,
            background: EncodedPixel::TRANSPARENT,
        }
    }
}

impl RasterOptions {
    /// Resolve raw command-line integers
    ///
    /// Unknown method codes select the colormap, a negative radius falls back
    /// to 1 and any channel outside `0..=255` becomes 0.
    pub fn from_codes(method: i64, radius: i64, background: [i64; 4]) -> Self {
        let point_radius = if radius < 0 {
            DEFAULT_POINT_RADIUS
        } else {
            u32::try_from(radius).unwrap_or(u32::MAX)
        };

        Self {
            method: EncodingMethod::from_code(method),
            point_radius,
            background: EncodedPixel(background.map(|c| u8::try_from(c).unwrap_or(0))),
        }
    }
}

/// RGBA canvas with clipped writes
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<EncodedPixel>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: EncodedPixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: i64, y: i64) -> Option<EncodedPixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Write one pixel; returns false when it falls outside the canvas
    pub fn put(&mut self, x: i64, y: i64, pixel: EncodedPixel) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = pixel;
                true
            }
            None => false,
        }
    }

    /// Stamp a square block of side `2 * radius + 1` centered on `(x, y)`
    ///
    /// Only the part of the block inside the canvas is visited. Returns the
    /// number of pixels written.
    pub fn draw_point(&mut self, x: i64, y: i64, radius: u32, pixel: EncodedPixel) -> usize {
        let r = radius as i64;
        let (Some((x0, x1)), Some((y0, y1))) =
            (clip_span(x, r, self.width), clip_span(y, r, self.height))
        else {
            return 0;
        };

        let stride = self.width as usize;
        for py in y0..=y1 {
            let row = py * stride;
            self.pixels[row + x0..=row + x1].fill(pixel);
        }
        (x1 - x0 + 1) * (y1 - y0 + 1)
    }

    /// Number of pixels that differ from `background`
    pub fn count_not(&self, background: EncodedPixel) -> usize {
        self.pixels.iter().filter(|&&p| p != background).count()
    }

    /// Row-major RGBA8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn into_image(self) -> AppResult<RgbaImage> {
        self.to_image()
    }

    pub fn to_image(&self) -> AppResult<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.as_bytes().to_vec()).ok_or_else(|| {
            AppError::Image(format!(
                "canvas buffer does not match {}x{}",
                self.width, self.height
            ))
        })
    }

    pub fn save_png(&self, path: &Path) -> AppResult<()> {
        self.to_image()?.save_with_format(path, ImageFormat::Png)?;
        debug!(path = %path.display(), width = self.width, height = self.height, "Canvas saved");
        Ok(())
    }
}

/// Inclusive index range of `[center - r, center + r]` inside `0..len`
fn clip_span(center: i64, r: i64, len: u32) -> Option<(usize, usize)> {
    let lo = center.saturating_sub(r).max(0);
    let hi = center.saturating_add(r).min(len as i64 - 1);
    if lo > hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}

/// Number of cells in a full `(2r + 1)²` block
fn block_area(radius: u32) -> u128 {
    let side = 2 * radius as u128 + 1;
    side * side
}

/// Rasterize `points` on a `width x height` canvas
///
/// # Errors
/// Normalizing encodings fail on a non-positive `max_distance` or a NaN
/// distance; the whole frame is rejected. Canvases above
/// [`MAX_FRAME_PIXELS`] are refused before allocation.
pub fn rasterize_points(
    points: &[Point],
    width: u32,
    height: u32,
    max_distance: f64,
    options: &RasterOptions,
) -> AppResult<Canvas> {
    if width as u64 * height as u64 > MAX_FRAME_PIXELS {
        return Err(AppError::Image(format!(
            "canvas {}x{} exceeds {} pixels",
            width, height, MAX_FRAME_PIXELS
        )));
    }

    let mut canvas = Canvas::new(width, height, options.background);
    let block = block_area(options.point_radius);
    let mut clipped: u128 = 0;

    for point in points {
        let pixel = encode(point.distance, max_distance, options.method)?;
        let written = canvas.draw_point(point.x, point.y, options.point_radius, pixel);
        clipped += block - written as u128;
    }

    debug!(
        points = points.len(),
        clipped,
        method = options.method.code(),
        "Frame rasterized"
    );
    Ok(canvas)
}

/// Rasterize a TOF frame against its own `max_distance`
pub fn rasterize_tof_frame(frame: &TofFrame, options: &RasterOptions) -> AppResult<Canvas> {
    rasterize_points(
        &frame.points,
        frame.width,
        frame.height,
        frame.max_distance,
        options,
    )
}

/// Load one TOF record and write it as a PNG
///
/// Returns the number of points drawn.
pub fn convert_tof_file(input: &Path, output: &Path, options: &RasterOptions) -> AppResult<usize> {
    let frame = TofFrame::from_path(input)?;
    let canvas = rasterize_tof_frame(&frame, options)?;
    canvas.save_png(output)?;
    Ok(frame.points.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: EncodedPixel = EncodedPixel::new(255, 0, 0, 255);
    const BLUE: EncodedPixel = EncodedPixel::new(0, 0, 255, 255);

    fn point(x: i64, y: i64, distance: f64) -> Point {
        Point {
            x,
            y,
            tx: 0.0,
            ty: 0.0,
            tz: 0.0,
            confidence: 1.0,
            distance,
        }
    }

    #[test]
    fn test_zero_radius_single_pixel() {
        let mut canvas = Canvas::new(5, 5, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(2, 2, 0, RED), 1);
        assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 1);
        assert_eq!(canvas.get(2, 2), Some(RED));
    }

    #[test]
    fn test_corner_block_clipped() {
        let mut canvas = Canvas::new(4, 4, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(3, 3, 1, RED), 4);
        assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 4);
        for (x, y) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
            assert_eq!(canvas.get(x, y), Some(RED));
        }
        assert_eq!(canvas.get(1, 3), Some(EncodedPixel::TRANSPARENT));

        // Radius 2 spans [1, 5] on each axis, only [1, 3] survives
        let mut canvas = Canvas::new(4, 4, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(3, 3, 2, BLUE), 9);
        assert_eq!(canvas.get(0, 3), Some(EncodedPixel::TRANSPARENT));
        assert_eq!(canvas.get(1, 1), Some(BLUE));
    }

    #[test]
    fn test_huge_radius_only_visits_canvas() {
        let mut canvas = Canvas::new(1, 1, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(0, 0, u32::MAX, RED), 1);
        assert_eq!(canvas.get(0, 0), Some(RED));

        let mut canvas = Canvas::new(3, 2, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(-1_000_000_000, 2_000_000_000, u32::MAX, BLUE), 6);
        assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 6);

        // Coordinates at the i64 limits saturate instead of overflowing
        assert_eq!(canvas.draw_point(i64::MIN, 0, u32::MAX, RED), 0);
        assert_eq!(canvas.draw_point(i64::MAX, 0, u32::MAX, RED), 0);
    }

    #[test]
    fn test_huge_radius_rasterizes() {
        let options = RasterOptions::from_codes(3, u32::MAX as i64, [0, 0, 0, 0]);
        assert_eq!(options.point_radius, u32::MAX);
        let canvas = rasterize_points(&[point(1, 1, 2.0)], 2, 2, 4.0, &options).unwrap();
        assert_eq!(canvas.count_not(EncodedPixel::TRANSPARENT), 4);
    }

    #[test]
    fn test_block_area_does_not_overflow() {
        assert_eq!(block_area(0), 1);
        assert_eq!(block_area(2), 25);
        let side = 2 * u32::MAX as u128 + 1;
        assert_eq!(block_area(u32::MAX), side * side);
    }

    #[test]
    fn test_oversized_canvas_rejected() {
        let options = RasterOptions::default();
        let result = rasterize_points(&[], u32::MAX, u32::MAX, 4.0, &options);
        assert!(matches!(result, Err(AppError::Image(_))));
    }

    #[test]
    fn test_point_fully_outside() {
        let mut canvas = Canvas::new(4, 4, EncodedPixel::TRANSPARENT);
        assert_eq!(canvas.draw_point(-5, 10, 1, RED), 0);
        assert!(!canvas.put(4, 0, RED));
    }

    #[test]
    fn test_last_write_wins() {
        let mut canvas = Canvas::new(3, 1, EncodedPixel::TRANSPARENT);
        canvas.draw_point(0, 0, 1, RED);
        canvas.draw_point(2, 0, 1, BLUE);
        assert_eq!(canvas.get(0, 0), Some(RED));
        assert_eq!(canvas.get(1, 0), Some(BLUE));
    }

    #[test]
    fn test_bytes_row_major() {
        let mut canvas = Canvas::new(2, 2, EncodedPixel::new(1, 2, 3, 4));
        canvas.put(1, 0, RED);
        let bytes = canvas.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &[1, 2, 3, 4]);
        assert_eq!(&bytes[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_options_from_codes() {
        let options = RasterOptions::from_codes(9, -3, [-1, 300, 7, 255]);
        assert_eq!(options.method, EncodingMethod::ColormapNormalized);
        assert_eq!(options.point_radius, 1);
        assert_eq!(options.background, EncodedPixel::new(0, 0, 7, 255));

        let options = RasterOptions::from_codes(2, 0, [0, 0, 0, 0]);
        assert_eq!(options.method, EncodingMethod::LinearNormalized);
        assert_eq!(options.point_radius, 0);
    }

    #[test]
    fn test_rasterize_points_in_order() {
        let options = RasterOptions {
            method: EncodingMethod::LinearNormalized,
            point_radius: 0,
            background: EncodedPixel::TRANSPARENT,
        };
        let points = [point(0, 0, 0.0), point(1, 0, 10.0), point(1, 0, 5.0)];
        let canvas = rasterize_points(&points, 2, 1, 10.0, &options).unwrap();
        assert_eq!(canvas.get(0, 0), Some(EncodedPixel::new(0, 0, 0, 255)));
        assert_eq!(canvas.get(1, 0), Some(EncodedPixel::new(128, 128, 128, 255)));
    }

    #[test]
    fn test_into_image_dimensions() {
        let mut canvas = Canvas::new(3, 2, EncodedPixel::TRANSPARENT);
        canvas.put(2, 1, RED);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_rasterize_rejects_bad_max_distance() {
        let options = RasterOptions::default();
        assert!(rasterize_points(&[point(0, 0, 1.0)], 2, 2, 0.0, &options).is_err());

        let raw = RasterOptions {
            method: EncodingMethod::RawBits,
            ..options
        };
        assert!(rasterize_points(&[point(0, 0, 1.0)], 2, 2, 0.0, &raw).is_ok());
    }
}
