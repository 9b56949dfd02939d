// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

/// Application name, used for the config directory
pub const APP_NAME: &str = "depthset";

/// Config file looked up under the user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Log filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Largest frame accepted from a record (width * height)
pub const MAX_FRAME_PIXELS: u64 = 1 << 26;

/// File naming for the dataset tools
pub mod file_formats {
    /// Extension of recorded frame documents
    pub const RECORD_EXTENSION: &str = "json";

    /// Extension of rendered frames
    pub const IMAGE_EXTENSION: &str = "png";

    /// Extension of exported point clouds
    pub const POINT_CLOUD_EXTENSION: &str = "las";

    /// Check if a file extension marks a frame record (case-insensitive)
    pub fn is_record_extension(ext: &str) -> bool {
        ext.eq_ignore_ascii_case(RECORD_EXTENSION)
    }
}
