// SPDX-License-Identifier: GPL-3.0-only

//! User configuration
//!
//! Stored as JSON. Lookup order: an explicit `--config` path, then
//! `<config dir>/depthset/config.json`, then built-in defaults. Missing keys
//! fall back to their defaults.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::depth::{DEFAULT_MAX_DEPTH, DISPARITY_SCALE};
use crate::encoding::EncodingMethod;
use crate::errors::{AppError, AppResult};
use crate::raster::{DEFAULT_POINT_RADIUS, RasterOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings for `evaluate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Upper bound of valid ground-truth depth (meters)
    pub max_depth: f64,
    /// Divisor applied to stored disparity integers
    pub disparity_scale: f64,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            disparity_scale: DISPARITY_SCALE,
        }
    }
}

/// Settings for `tof2png`, kept as the raw integers the command line accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterSettings {
    /// Encoding method code (1 raw bits, 2 linear, 3 colormap)
    pub method: i64,
    pub point_radius: i64,
    /// RGBA background
    pub background: [i64; 4],
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            method: EncodingMethod::default().code(),
            point_radius: DEFAULT_POINT_RADIUS as i64,
            background: [0; 4],
        }
    }
}

impl RasterSettings {
    /// Resolve into rasterizer options, applying the out-of-range fallbacks
    pub fn options(&self) -> RasterOptions {
        RasterOptions::from_codes(self.method, self.point_radius, self.background)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub evaluation: EvaluationSettings,
    pub raster: RasterSettings,
}

impl Config {
    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration
    ///
    /// An explicit path must exist and parse. The default location is optional
    /// but a file that exists there must still parse.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_json_str(&json)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = Config::from_json_str(r#"{"evaluation": {"max_depth": 80.0}}"#).unwrap();
        assert_eq!(config.evaluation.max_depth, 80.0);
        assert_eq!(config.evaluation.disparity_scale, DISPARITY_SCALE);
        assert_eq!(config.raster, RasterSettings::default());
    }

    #[test]
    fn test_raster_settings_fallbacks() {
        let settings = RasterSettings {
            method: 1,
            point_radius: -4,
            background: [0, 0, 0, 999],
        };
        let options = settings.options();
        assert_eq!(options.method, EncodingMethod::RawBits);
        assert_eq!(options.point_radius, DEFAULT_POINT_RADIUS);
        assert_eq!(options.background.a(), 0);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = std::env::temp_dir().join("depthset_no_such_config.json");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Config::from_json_str("{not json").is_err());
    }
}
