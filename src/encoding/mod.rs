// SPDX-License-Identifier: GPL-3.0-only

//! Distance to RGBA pixel encodings
//!
//! Three mutually exclusive schemes turn one measured distance into a pixel:
//! - raw IEEE-754 bits of the 32-bit float, big-endian across R, G, B, A
//! - normalized grayscale intensity
//! - normalized intensity looked up in the plasma palette
//!
//! The scheme is not stored in the pixel, so decoders must be told which one
//! produced it.

mod colormap;

pub use colormap::{PLASMA, nearest_plasma_index, plasma_rgba};

use crate::errors::PreconditionError;

/// One RGBA8 pixel
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EncodedPixel(pub [u8; 4]);

impl EncodedPixel {
    /// Fully transparent black
    pub const TRANSPARENT: EncodedPixel = EncodedPixel([0, 0, 0, 0]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn a(&self) -> u8 {
        self.0[3]
    }
}

impl From<[u8; 4]> for EncodedPixel {
    fn from(rgba: [u8; 4]) -> Self {
        Self(rgba)
    }
}

/// Distance encoding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingMethod {
    /// Lossless big-endian float bits
    RawBits,
    /// Clamped, normalized grayscale with opaque alpha
    LinearNormalized,
    /// Clamped, normalized index into the plasma palette (default)
    #[default]
    ColormapNormalized,
}

impl EncodingMethod {
    pub const ALL: [EncodingMethod; 3] = [
        EncodingMethod::RawBits,
        EncodingMethod::LinearNormalized,
        EncodingMethod::ColormapNormalized,
    ];

    /// Resolve the command-line code; anything but 1 or 2 selects the colormap
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => EncodingMethod::RawBits,
            2 => EncodingMethod::LinearNormalized,
            _ => EncodingMethod::ColormapNormalized,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            EncodingMethod::RawBits => 1,
            EncodingMethod::LinearNormalized => 2,
            EncodingMethod::ColormapNormalized => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EncodingMethod::RawBits => "Float IEEE-754 -> RGBA",
            EncodingMethod::LinearNormalized => "Float IEEE-754 -> int[0,255] -> RGBA",
            EncodingMethod::ColormapNormalized => "Float IEEE-754 -> int[0,255] -> plasma -> RGBA",
        }
    }
}

/// Encode `distance` with `method`
///
/// `max_distance` is only consulted by the normalizing schemes.
///
/// # Errors
/// Normalizing schemes reject `max_distance <= 0` and NaN distances.
pub fn encode(
    distance: f64,
    max_distance: f64,
    method: EncodingMethod,
) -> Result<EncodedPixel, PreconditionError> {
    match method {
        EncodingMethod::RawBits => Ok(encode_raw_bits(distance)),
        EncodingMethod::LinearNormalized => {
            let index = normalized_index(distance, max_distance)?;
            Ok(EncodedPixel([index, index, index, 255]))
        }
        EncodingMethod::ColormapNormalized => {
            let index = normalized_index(distance, max_distance)?;
            Ok(EncodedPixel(plasma_rgba(index)))
        }
    }
}

/// Big-endian bytes of `distance` narrowed to `f32`
pub fn encode_raw_bits(distance: f64) -> EncodedPixel {
    EncodedPixel((distance as f32).to_be_bytes())
}

/// Exact inverse of [`encode_raw_bits`]
pub fn decode_raw_bits(pixel: EncodedPixel) -> f32 {
    f32::from_be_bytes(pixel.0)
}

/// Approximate distance of a grayscale pixel (within half a quantization step)
pub fn decode_linear(pixel: EncodedPixel, max_distance: f64) -> Result<f64, PreconditionError> {
    check_max_distance(max_distance)?;
    Ok(index_to_distance(pixel.r(), max_distance))
}

/// Approximate distance of a plasma pixel via the nearest palette entry
pub fn decode_colormap(pixel: EncodedPixel, max_distance: f64) -> Result<f64, PreconditionError> {
    check_max_distance(max_distance)?;
    let index = nearest_plasma_index([pixel.r(), pixel.g(), pixel.b()]);
    Ok(index_to_distance(index, max_distance))
}

/// Clamp to `[0, max_distance]` and quantize to `0..=255`
///
/// Rounds half to even, so 0.5 / 255 of the range lands on index 0.
pub fn normalized_index(distance: f64, max_distance: f64) -> Result<u8, PreconditionError> {
    check_max_distance(max_distance)?;
    if distance.is_nan() {
        return Err(PreconditionError::NonFiniteDistance(distance));
    }

    let clamped = distance.clamp(0.0, max_distance);
    let normalized = clamped / max_distance;
    Ok((normalized * 255.0).round_ties_even() as u8)
}

/// Round a `[0, 1]` channel to a byte the way the palette lookup does
pub(crate) fn unit_to_byte(value: f64) -> u8 {
    (value * 255.0).round_ties_even() as u8
}

fn index_to_distance(index: u8, max_distance: f64) -> f64 {
    index as f64 / 255.0 * max_distance
}

fn check_max_distance(max_distance: f64) -> Result<(), PreconditionError> {
    if max_distance.is_nan() || max_distance <= 0.0 {
        return Err(PreconditionError::NonPositiveMaxDistance(max_distance));
    }
    Ok(())
}
