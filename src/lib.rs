// SPDX-License-Identifier: GPL-3.0-only

//! depthset - tools for ARCore depth datasets
//!
//! This library holds the numeric core of the dataset tooling:
//! scale/shift alignment of predicted disparity against ground truth, and the
//! encodings used to render recorded depth frames as images.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`depth`]: Depth grids, the alignment solver and the evaluation pipeline
//! - [`encoding`]: Distance to RGBA encodings and their inverses
//! - [`records`]: Recorded TOF and point cloud frames
//! - [`raster`]: Drawing frame points onto RGBA canvases
//! - [`images`]: Loading disparity rasters
//! - [`export`]: LAS export of point cloud frames
//! - [`config`]: User configuration handling
//!
//! # Example
//!
//! ```
//! use depthset::{DepthMap, ValidityMask, solve};
//!
//! let prediction = DepthMap::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! let target = prediction.map(|p| 2.0 * p + 1.0);
//! let mask = ValidityMask::uniform(2, 2, true);
//!
//! let result = solve(&prediction, &target, &mask).unwrap();
//! assert!((result.scale - 2.0).abs() < 1e-9);
//! assert!((result.shift - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod constants;
pub mod depth;
pub mod encoding;
pub mod errors;
pub mod export;
pub mod images;
pub mod raster;
pub mod records;

// Re-export commonly used types
pub use config::Config;
pub use depth::{AlignmentResult, DepthMap, DepthMetrics, EvaluationReport, ValidityMask, solve};
pub use encoding::{EncodedPixel, EncodingMethod, encode};
pub use errors::{AppError, AppResult, PreconditionError, RecordError};
pub use raster::{Canvas, RasterOptions};
pub use records::{PointCloudFrame, TofFrame};
