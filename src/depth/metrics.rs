// SPDX-License-Identifier: GPL-3.0-only

//! Standard monocular depth error metrics

use super::{DELTA_THRESHOLD, DepthMap, ValidityMask};
use crate::errors::PreconditionError;
use serde::Serialize;

/// Error and accuracy scores over the valid pixels of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthMetrics {
    /// mean(|pred - gt| / gt)
    pub abs_rel: f64,
    /// mean((pred - gt)^2 / gt)
    pub sq_rel: f64,
    /// sqrt(mean((pred - gt)^2))
    pub rmse: f64,
    /// sqrt(mean((ln pred - ln gt)^2))
    pub rmse_log: f64,
    /// Fraction with max(pred/gt, gt/pred) < 1.25
    pub delta1: f64,
    /// Same with 1.25^2
    pub delta2: f64,
    /// Same with 1.25^3
    pub delta3: f64,
    pub valid_pixels: usize,
}

impl DepthMetrics {
    /// Score `predicted` against `ground_truth` on the cells of `mask`
    ///
    /// Returns `Ok(None)` when the mask selects nothing.
    pub fn compute(
        predicted: &DepthMap,
        ground_truth: &DepthMap,
        mask: &ValidityMask,
    ) -> Result<Option<Self>, PreconditionError> {
        let shape = ground_truth.dimensions();
        predicted.ensure_shape("prediction", shape)?;
        mask.ensure_shape("mask", shape)?;

        let mut abs_rel = 0.0;
        let mut sq_rel = 0.0;
        let mut sq = 0.0;
        let mut sq_log = 0.0;
        let mut within = [0usize; 3];
        let mut count = 0usize;

        let cells = predicted
            .samples()
            .iter()
            .zip(ground_truth.samples())
            .zip(mask.values());

        for ((&pred, &gt), &valid) in cells {
            if !valid {
                continue;
            }
            let diff = pred - gt;
            abs_rel += diff.abs() / gt;
            sq_rel += diff * diff / gt;
            sq += diff * diff;
            let log_diff = pred.ln() - gt.ln();
            sq_log += log_diff * log_diff;

            let ratio = (gt / pred).max(pred / gt);
            let mut threshold = DELTA_THRESHOLD;
            for hit in within.iter_mut() {
                if ratio < threshold {
                    *hit += 1;
                }
                threshold *= DELTA_THRESHOLD;
            }
            count += 1;
        }

        if count == 0 {
            return Ok(None);
        }

        let n = count as f64;
        Ok(Some(Self {
            abs_rel: abs_rel / n,
            sq_rel: sq_rel / n,
            rmse: (sq / n).sqrt(),
            rmse_log: (sq_log / n).sqrt(),
            delta1: within[0] as f64 / n,
            delta2: within[1] as f64 / n,
            delta3: within[2] as f64 / n,
            valid_pixels: count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_errors() {
        let gt = DepthMap::from_rows(&[[2.0, 4.0]]).unwrap();
        let pred = DepthMap::from_rows(&[[2.0, 6.0]]).unwrap();
        let mask = ValidityMask::uniform(2, 1, true);

        let m = DepthMetrics::compute(&pred, &gt, &mask).unwrap().unwrap();
        assert_eq!(m.valid_pixels, 2);
        assert!((m.abs_rel - 0.25).abs() < 1e-12);
        assert!((m.sq_rel - 0.5).abs() < 1e-12);
        assert!((m.rmse - 2.0_f64.sqrt()).abs() < 1e-12);
        // ratio 1.5 misses 1.25 but hits 1.5625
        assert_eq!(m.delta1, 0.5);
        assert_eq!(m.delta2, 1.0);
        assert_eq!(m.delta3, 1.0);
    }

    #[test]
    fn test_empty_mask() {
        let map = DepthMap::filled(2, 2, 1.0);
        let mask = ValidityMask::uniform(2, 2, false);
        assert_eq!(DepthMetrics::compute(&map, &map, &mask).unwrap(), None);
    }
}
