//! Partial settings updates and the change report handed to strategies.

use serde::{Deserialize, Serialize};

use crate::geometry::Dimensions;

/// A partial update of controller settings. `None` fields stay unchanged.
///
/// Deserializes from JSON objects such as `{"zoom": 2.0}` or
/// `{"viewport": {"width": 1024, "height": 768}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsUpdate {
    pub viewport: Option<Dimensions>,
    pub zoom: Option<f64>,
    pub speed: Option<f64>,
    pub image: Option<Dimensions>,
}

impl SettingsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Dimensions) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_image(mut self, image: Dimensions) -> Self {
        self.image = Some(image);
        self
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.viewport.is_none() && self.zoom.is_none() && self.speed.is_none() && self.image.is_none()
    }
}

/// What an applied [`SettingsUpdate`] actually changed.
///
/// A zoom or image change is scene-defining; a viewport resize is a viewport
/// change; a speed-only change is neither. `update` carries the raw values
/// the caller supplied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SettingsChange {
    pub scene_changed: bool,
    pub viewport_changed: bool,
    pub update: SettingsUpdate,
}

impl SettingsChange {
    /// True if the geometry changed in any way.
    pub fn moves_geometry(&self) -> bool {
        self.scene_changed || self.viewport_changed
    }
}
