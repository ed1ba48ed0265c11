//! Demo configuration, loaded from an optional JSON file.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change:
//!
//! ```json
//! {
//!     "width": 800,
//!     "font": { "path": "assets/DejaVuSansMono.ttf" },
//!     "tank": { "position": [1.0, 0.0], "orientation": 1.57, "size": [1.0, 1.0] }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::math::Vec2;
use crate::object::Pose;
use crate::render::ClearColor;

/// DejaVu Sans Mono, shipped in the crate's `assets/` directory.
pub const BUNDLED_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSansMono.ttf");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub path: PathBuf,
    /// Pixel height glyphs are rasterized at.
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(BUNDLED_FONT),
            size: 24.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub clear_color: [f64; 4],
    /// World units visible across the window before aspect fitting.
    pub viewplane: Vec2,
    pub show_global_axes: bool,
    /// Overlay font, the bundled one unless overridden. `null` turns the
    /// matrix readout off.
    pub font: Option<FontConfig>,
    /// Initial tank pose.
    pub tank: Pose,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "GDV4002 - Applied Maths for Games".to_string(),
            width: 1024,
            height: 1024,
            clear_color: ClearColor::default().0,
            viewplane: Vec2::splat(5.0),
            show_global_axes: true,
            font: Some(FontConfig::default()),
            tank: Pose::default(),
        }
    }
}

impl DemoConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Reject values that would leave nothing on screen.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.viewplane.is_finite() || self.viewplane.cmple(Vec2::ZERO).any() {
            return Err(format!(
                "viewplane must be positive, got [{}, {}]",
                self.viewplane.x, self.viewplane.y
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        if let Some(font) = &self.font {
            if !font.size.is_finite() || font.size <= 0.0 {
                return Err(format!("font size must be positive, got {}", font.size));
            }
        }
        Ok(())
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn clear_color(&self) -> ClearColor {
        ClearColor(self.clear_color)
    }
}
