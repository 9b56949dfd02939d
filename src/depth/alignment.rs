// SPDX-License-Identifier: GPL-3.0-only

//! Scale and shift alignment of a disparity prediction
//!
//! Solves the masked 2x2 normal equations of
//! `min_{s,t} sum_mask (s * p_i + t - d_i)^2` in closed form.

use super::{DepthMap, ValidityMask};
use crate::errors::PreconditionError;

/// Affine map `aligned = scale * predicted + shift`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentResult {
    pub scale: f64,
    pub shift: f64,
}

impl AlignmentResult {
    /// No-op alignment returned when the system is not positive-definite
    pub const DEGENERATE: AlignmentResult = AlignmentResult {
        scale: 0.0,
        shift: 0.0,
    };

    pub fn is_degenerate(&self) -> bool {
        *self == Self::DEGENERATE
    }

    /// Align every sample of `prediction`
    pub fn apply(&self, prediction: &DepthMap) -> DepthMap {
        prediction.map(|p| self.scale * p + self.shift)
    }
}

/// Least-squares scale and shift mapping `prediction` onto `target`
///
/// Sums run in row-major order over the valid cells of `mask`. When
/// `a00 * a11 - a01^2` is not strictly positive (empty mask, a single valid
/// pixel, constant prediction) the result is [`AlignmentResult::DEGENERATE`].
///
/// # Errors
/// [`PreconditionError::ShapeMismatch`] when the three grids differ in shape.
pub fn solve(
    prediction: &DepthMap,
    target: &DepthMap,
    mask: &ValidityMask,
) -> Result<AlignmentResult, PreconditionError> {
    let shape = prediction.dimensions();
    target.ensure_shape("target", shape)?;
    mask.ensure_shape("mask", shape)?;

    let mut a00 = 0.0;
    let mut a01 = 0.0;
    let mut a11 = 0.0;
    let mut b0 = 0.0;
    let mut b1 = 0.0;

    let cells = prediction
        .samples()
        .iter()
        .zip(target.samples())
        .zip(mask.values());

    for ((&p, &t), &valid) in cells {
        if !valid {
            continue;
        }
        a00 += p * p;
        a01 += p;
        a11 += 1.0;
        b0 += p * t;
        b1 += t;
    }

    let det = a00 * a11 - a01 * a01;

    // NaN falls through to the degenerate branch as well
    if det > 0.0 {
        Ok(AlignmentResult {
            scale: (a11 * b0 - a01 * b1) / det,
            shift: (-a01 * b0 + a00 * b1) / det,
        })
    } else {
        Ok(AlignmentResult::DEGENERATE)
    }
}
