//! Session configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! overrides.

use crate::constants::{
    CLICK_TOLERANCE, DUPLICATE_OFFSET, IMAGE_MAX_INITIAL_SIZE, IMAGE_ORIGIN, MIN_TRANSFORM_SIZE,
};
use crate::error::{CanvasError, CanvasResult};
use crate::geometry::SelectionMode;
use crate::style::StyleRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How the marquee matches shapes
    pub marquee_mode: SelectionMode,
    pub duplicate_offset: (f32, f32),
    /// Max pointer travel for a press/release to count as a click
    pub click_tolerance: f32,
    pub image_max_size: f32,
    pub image_origin: (f32, f32),
    pub min_transform_size: f32,
    /// Initial value of the session's current style
    pub default_style: StyleRecord,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            marquee_mode: SelectionMode::default(),
            duplicate_offset: DUPLICATE_OFFSET,
            click_tolerance: CLICK_TOLERANCE,
            image_max_size: IMAGE_MAX_INITIAL_SIZE,
            image_origin: IMAGE_ORIGIN,
            min_transform_size: MIN_TRANSFORM_SIZE,
            default_style: StyleRecord::default(),
        }
    }
}

impl SessionConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> CanvasResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CanvasError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json(&content)?;
        info!("Loaded session config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> CanvasResult<Self> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| CanvasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CanvasResult<()> {
        let non_negative = [
            ("click_tolerance", self.click_tolerance),
            ("image_max_size", self.image_max_size),
            ("min_transform_size", self.min_transform_size),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CanvasError::Config(format!("{name} must be a non-negative number")));
            }
        }
        Ok(())
    }
}
