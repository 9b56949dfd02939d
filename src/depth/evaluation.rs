// SPDX-License-Identifier: GPL-3.0-only

//! Disparity-space evaluation of a monocular depth prediction

use super::{AlignmentResult, DepthMap, DepthMetrics, ValidityMask, solve};
use crate::errors::{AppResult, PreconditionError};
use tracing::{debug, warn};

/// Outcome of one prediction / ground-truth comparison
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub alignment: AlignmentResult,
    /// Ground-truth pixels inside `(0, max_depth)`
    pub valid_pixels: usize,
    /// `None` when no pixel was valid
    pub metrics: Option<DepthMetrics>,
}

/// Select ground-truth pixels with depth strictly inside `(0, max_depth)`
pub fn validity_mask(target_depth: &DepthMap, max_depth: f64) -> ValidityMask {
    ValidityMask::from_predicate(target_depth, |d| d > 0.0 && d < max_depth)
}

/// Invert depth to disparity on valid pixels; invalid pixels become 0
pub fn depth_to_disparity(
    target_depth: &DepthMap,
    mask: &ValidityMask,
) -> Result<DepthMap, PreconditionError> {
    mask.ensure_shape("mask", target_depth.dimensions())?;

    let samples = target_depth
        .samples()
        .iter()
        .zip(mask.values())
        .map(|(&d, &valid)| if valid { 1.0 / d } else { 0.0 })
        .collect();

    DepthMap::new(target_depth.width(), target_depth.height(), samples)
}

/// Clamp aligned disparity from below at `1 / max_depth` and invert to depth
pub fn disparity_to_depth(aligned: &DepthMap, max_depth: f64) -> Result<DepthMap, PreconditionError> {
    if max_depth.is_nan() || max_depth <= 0.0 {
        return Err(PreconditionError::NonPositiveMaxDistance(max_depth));
    }
    let cap = 1.0 / max_depth;
    Ok(aligned.map(|v| if v < cap { 1.0 / cap } else { 1.0 / v }))
}

/// Align `prediction` (disparity) to `target_depth` and score it
///
/// # Errors
/// Shape mismatch between the two grids, or a non-positive `max_depth`.
pub fn evaluate(
    prediction: &DepthMap,
    target_depth: &DepthMap,
    max_depth: f64,
) -> AppResult<EvaluationReport> {
    if max_depth.is_nan() || max_depth <= 0.0 {
        return Err(PreconditionError::NonPositiveMaxDistance(max_depth).into());
    }
    target_depth.ensure_shape("ground truth", prediction.dimensions())?;

    let mask = validity_mask(target_depth, max_depth);
    let valid_pixels = mask.count();
    let target_disparity = depth_to_disparity(target_depth, &mask)?;

    let alignment = solve(prediction, &target_disparity, &mask)?;
    debug!(
        scale = alignment.scale,
        shift = alignment.shift,
        valid_pixels,
        "Alignment solved"
    );
    if alignment.is_degenerate() {
        warn!(valid_pixels, "Alignment system not positive-definite, no correction applied");
    }

    let aligned = alignment.apply(prediction);
    let predicted_depth = disparity_to_depth(&aligned, max_depth)?;
    let metrics = DepthMetrics::compute(&predicted_depth, target_depth, &mask)?;

    Ok(EvaluationReport {
        alignment,
        valid_pixels,
        metrics,
    })
}
