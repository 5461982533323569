use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::view::ZoomLimits;

/// Class marking editor-injected overlay markup.
pub const DEFAULT_OVERLAY_CLASS: &str = "svg-editor-overlay";

/// Tunables for [`SvgEditor`](crate::SvgEditor). Missing JSON fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub history_depth: usize,
    /// Zoom bounds, in percent
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub zoom_step: f32,
    pub wheel_zoom_sensitivity: f32,
    /// Side of an anchor square, in document units
    pub handle_size: f32,
    /// Pointer distance that still grabs a handle, in screen pixels
    pub handle_hit_radius: f32,
    pub min_shape_size: f32,
    pub overlay_class: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            min_zoom: 10.0,
            max_zoom: 800.0,
            zoom_step: 25.0,
            wheel_zoom_sensitivity: 0.01,
            handle_size: 8.0,
            handle_hit_radius: 6.0,
            min_shape_size: crate::element::MIN_SHAPE_SIZE,
            overlay_class: DEFAULT_OVERLAY_CLASS.to_owned(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..{} is empty or not positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.zoom_step > 0.0) {
            return Err(ConfigError::Invalid("zoom_step must be positive".to_owned()));
        }
        if !(self.min_shape_size > 0.0) {
            return Err(ConfigError::Invalid("min_shape_size must be positive".to_owned()));
        }
        if self.overlay_class.split_whitespace().count() != 1 {
            return Err(ConfigError::Invalid(format!(
                "overlay_class {:?} must be a single class name",
                self.overlay_class
            )));
        }
        Ok(())
    }

    pub fn zoom_limits(&self) -> ZoomLimits {
        ZoomLimits {
            min: self.min_zoom,
            max: self.max_zoom,
            step: self.zoom_step,
            wheel_sensitivity: self.wheel_zoom_sensitivity,
        }
    }
}
