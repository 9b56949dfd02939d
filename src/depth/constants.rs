// SPDX-License-Identifier: GPL-3.0-only

//! Depth evaluation constants

/// Stored integer disparity units per unit of real disparity.
/// Prediction and ground-truth rasters are divided by this on load.
pub const DISPARITY_SCALE: f64 = 256.0;

/// Default upper bound (meters) for valid ground-truth depth
pub const DEFAULT_MAX_DEPTH: f64 = 10.0;

/// Ratio threshold base for the delta accuracy metrics
pub const DELTA_THRESHOLD: f64 = 1.25;
