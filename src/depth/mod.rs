// SPDX-License-Identifier: GPL-3.0-only

//! Depth grids and monocular depth evaluation
//!
//! Ground truth and predictions are held as row-major [`DepthMap`] grids.
//! Evaluation happens in disparity (inverse depth) space:
//!
//! 1. mask ground-truth pixels with depth in `(0, max_depth)`
//! 2. invert ground truth to disparity on the masked pixels
//! 3. fit `scale * prediction + shift` by least squares ([`solve`])
//! 4. clamp the aligned disparity at `1 / max_depth` and invert back to depth
//! 5. score the result with [`DepthMetrics`]

mod alignment;
mod constants;
mod evaluation;
mod metrics;

pub use alignment::{AlignmentResult, solve};
pub use constants::*;
pub use evaluation::{
    EvaluationReport, depth_to_disparity, disparity_to_depth, evaluate, validity_mask,
};
pub use metrics::DepthMetrics;

use crate::errors::PreconditionError;

/// Row-major grid of real-valued samples (depth or disparity)
#[derive(Debug, Clone, PartialEq)]
pub struct DepthMap {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl DepthMap {
    /// Wrap a sample buffer, which must hold exactly `width * height` values
    pub fn new(width: usize, height: usize, samples: Vec<f64>) -> Result<Self, PreconditionError> {
        check_len(width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a grid from rows of equal length
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, PreconditionError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut samples = Vec::with_capacity(width * height);
        for row in rows {
            samples.extend_from_slice(row.as_ref());
        }
        Self::new(width, height, samples)
    }

    /// Grid with every sample set to `value`
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Samples in row-major order
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get(y * self.width + x).copied()
    }

    /// Apply `f` to every sample, keeping the shape
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            samples: self.samples.iter().map(|&v| f(v)).collect(),
        }
    }

    pub(crate) fn ensure_shape(
        &self,
        what: &'static str,
        expected: (usize, usize),
    ) -> Result<(), PreconditionError> {
        ensure_shape(what, expected, self.dimensions())
    }
}

/// Boolean selector paired with a [`DepthMap`] of the same shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityMask {
    width: usize,
    height: usize,
    values: Vec<bool>,
}

impl ValidityMask {
    pub fn new(width: usize, height: usize, values: Vec<bool>) -> Result<Self, PreconditionError> {
        check_len(width, height, values.len())?;
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Mask with every cell set to `valid`
    pub fn uniform(width: usize, height: usize, valid: bool) -> Self {
        Self {
            width,
            height,
            values: vec![valid; width * height],
        }
    }

    /// Mask selecting the samples of `map` for which `predicate` holds
    pub fn from_predicate(map: &DepthMap, predicate: impl Fn(f64) -> bool) -> Self {
        Self {
            width: map.width,
            height: map.height,
            values: map.samples.iter().map(|&v| predicate(v)).collect(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Cells in row-major order
    pub fn values(&self) -> &[bool] {
        &self.values
    }

    /// Number of valid cells
    pub fn count(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }

    pub(crate) fn ensure_shape(
        &self,
        what: &'static str,
        expected: (usize, usize),
    ) -> Result<(), PreconditionError> {
        ensure_shape(what, expected, self.dimensions())
    }
}

fn check_len(width: usize, height: usize, len: usize) -> Result<(), PreconditionError> {
    let expected = width * height;
    if len != expected {
        return Err(PreconditionError::BufferLength {
            expected,
            actual: len,
        });
    }
    Ok(())
}

fn ensure_shape(
    what: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), PreconditionError> {
    if expected != actual {
        return Err(PreconditionError::ShapeMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_row_major() {
        let map = DepthMap::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(map.dimensions(), (3, 2));
        assert_eq!(map.get(2, 0), Some(3.0));
        assert_eq!(map.get(0, 1), Some(4.0));
        assert_eq!(map.get(3, 0), None);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            DepthMap::from_rows(&rows),
            Err(PreconditionError::BufferLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_mask_from_predicate() {
        let map = DepthMap::from_rows(&[[0.0, 1.0], [5.0, 12.0]]).unwrap();
        let mask = ValidityMask::from_predicate(&map, |v| v > 0.0 && v < 10.0);
        assert_eq!(mask.values(), &[false, true, true, false]);
        assert_eq!(mask.count(), 2);
    }
}
