//! Zoom, pan and canvas background. Independent of selection and editing.

use egui::{Modifiers, Vec2};
use glam::Affine2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackgroundMode {
    #[default]
    Solid,
    Checkerboard,
}

impl BackgroundMode {
    pub fn toggled(self) -> Self {
        match self {
            BackgroundMode::Solid => BackgroundMode::Checkerboard,
            BackgroundMode::Checkerboard => BackgroundMode::Solid,
        }
    }
}

/// Zoom bounds and step sizes, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub wheel_sensitivity: f32,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: 10.0, max: 800.0, step: 25.0, wheel_sensitivity: 0.01 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom_percent: f32,
    pub pan: Vec2,
    pub background: BackgroundMode,
    #[serde(skip)]
    limits: ZoomLimits,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

impl ViewState {
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            zoom_percent: 100.0,
            pan: Vec2::ZERO,
            background: BackgroundMode::default(),
            limits,
        }
    }

    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Replace the limits, re-clamping the current zoom.
    pub fn set_limits(&mut self, limits: ZoomLimits) {
        self.limits = limits;
        self.set_zoom(self.zoom_percent);
    }

    /// Clamp and apply a zoom level. Returns whether anything changed.
    pub fn set_zoom(&mut self, percent: f32) -> bool {
        if !percent.is_finite() {
            return false;
        }
        let clamped = percent.clamp(self.limits.min, self.limits.max);
        if clamped == self.zoom_percent {
            return false;
        }
        self.zoom_percent = clamped;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom_percent + self.limits.step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom_percent - self.limits.step)
    }

    pub fn pan_by(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO || !delta.is_finite() {
            return false;
        }
        self.pan += delta;
        true
    }

    /// Back to 100% at the origin. The background is left alone.
    pub fn reset(&mut self) -> bool {
        let changed = self.zoom_percent != 100.0 || self.pan != Vec2::ZERO;
        self.zoom_percent = 100.0;
        self.pan = Vec2::ZERO;
        changed
    }

    pub fn toggle_background(&mut self) -> BackgroundMode {
        self.background = self.background.toggled();
        self.background
    }

    /// Wheel or trackpad scroll. Deltas follow the browser convention
    /// (positive y scrolls down). With command/ctrl held the scroll zooms,
    /// otherwise it pans.
    pub fn apply_wheel(&mut self, delta: Vec2, modifiers: Modifiers) -> bool {
        if modifiers.command || modifiers.ctrl {
            let factor = (-delta.y * self.limits.wheel_sensitivity).exp();
            self.set_zoom(self.zoom_percent * factor)
        } else {
            self.pan_by(-delta)
        }
    }

    /// Pan and zoom, applied on top of the host's base screen transform.
    pub fn transform(&self) -> Affine2 {
        Affine2::from_translation(glam::Vec2::new(self.pan.x, self.pan.y))
            * Affine2::from_scale(glam::Vec2::splat(self.zoom_percent / 100.0))
    }
}
