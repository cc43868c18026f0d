//! The motion controller: owns the geometry and drives the active strategy.
//!
//! The controller derives the scaled image size from the viewport, the
//! original image size and the zoom level, keeps the current position inside
//! the legal travel range, and delegates "where next" to its
//! [`MotionStrategy`] once per [`tick`](MotionController::tick).
//!
//! It never fails. Degenerate geometry (an image without area, a viewport
//! without width) produces a `(0, 0)` scaled size and a centered, motionless
//! image.

use tracing::debug;

use crate::geometry::{scaled_size, BoundingBox, Dimensions, Position};
use crate::scene::Scene;
use crate::settings::{SettingsChange, SettingsUpdate};
use crate::strategy::MotionStrategy;

/// Zoom levels below this are clamped up.
pub const MIN_ZOOM: f64 = 1.0;

/// Coarse motion state as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// No travel room on either axis; the image is pinned centered.
    Idle,
    /// The image advances every tick.
    Cruising,
}

/// Pan/zoom state machine for presenting an oversized image in a viewport.
#[derive(Debug, Clone)]
pub struct MotionController<S> {
    viewport: Dimensions,
    original: Dimensions,
    zoom_level: f64,
    speed_level: f64,
    scaled: Dimensions,
    position: Position,
    strategy: S,
}

impl<S: MotionStrategy> MotionController<S> {
    /// Builds a controller with the image centered in the viewport.
    ///
    /// `zoom_level` is clamped to at least [`MIN_ZOOM`]; `speed_level` is in
    /// viewport widths per second and may be negative.
    pub fn new(
        viewport: Dimensions,
        original: Dimensions,
        zoom_level: f64,
        speed_level: f64,
        mut strategy: S,
    ) -> Self {
        let zoom_level = zoom_level.max(MIN_ZOOM);
        let scaled = scaled_size(viewport, original, zoom_level);
        let scene = Scene::new(viewport, scaled, speed_level);
        let position = scene.centered();
        strategy.attach(&scene, position);
        Self {
            viewport,
            original,
            zoom_level,
            speed_level,
            scaled,
            position,
            strategy,
        }
    }

    /// Geometry snapshot handed to the strategy.
    pub fn scene(&self) -> Scene {
        Scene::new(self.viewport, self.scaled, self.speed_level)
    }

    /// True if either axis has travel room beyond the tolerance.
    pub fn is_pannable(&self) -> bool {
        self.scene().is_pannable()
    }

    pub fn motion_state(&self) -> MotionState {
        if self.is_pannable() {
            MotionState::Cruising
        } else {
            MotionState::Idle
        }
    }

    /// Advances the image by `delta_seconds`.
    ///
    /// A non-pannable scene pins the image centered and leaves the strategy's
    /// state untouched.
    pub fn tick(&mut self, delta_seconds: f64) {
        let scene = self.scene();
        if !scene.is_pannable() {
            self.position = scene.centered();
            return;
        }
        self.position = self
            .strategy
            .next_position(&scene, delta_seconds, self.position);
    }

    /// Applies a partial settings update and returns what changed.
    ///
    /// On a zoom, image or viewport change the point of the image at the
    /// viewport center is kept there as far as the new travel range allows.
    /// The strategy's settings hook is always invoked afterwards.
    pub fn update_settings(&mut self, update: SettingsUpdate) -> SettingsChange {
        let old_viewport = self.viewport;
        let old_scaled = self.scaled;
        let old_position = self.position;

        let mut change = SettingsChange {
            update,
            ..SettingsChange::default()
        };

        if let Some(viewport) = update.viewport {
            if viewport != self.viewport {
                self.viewport = viewport;
                change.viewport_changed = true;
            }
        }
        if let Some(zoom) = update.zoom {
            let zoom = zoom.max(MIN_ZOOM);
            if zoom != self.zoom_level {
                self.zoom_level = zoom;
                change.scene_changed = true;
            }
        }
        if let Some(speed) = update.speed {
            self.speed_level = speed;
        }
        if let Some(image) = update.image {
            if image != self.original {
                self.original = image;
                change.scene_changed = true;
            }
        }

        self.scaled = scaled_size(self.viewport, self.original, self.zoom_level);
        let scene = self.scene();

        if change.moves_geometry() {
            self.position = if old_scaled.is_degenerate() || self.scaled.is_degenerate() {
                scene.centered()
            } else {
                let old_scene = Scene::new(old_viewport, old_scaled, self.speed_level);
                let center = old_scene.view_center_on_image(old_position);
                let ratio_x = center.x / old_scaled.width;
                let ratio_y = center.y / old_scaled.height;
                scene.constrain(Position::new(
                    -(ratio_x * self.scaled.width) + self.viewport.width / 2.0,
                    -(ratio_y * self.scaled.height) + self.viewport.height / 2.0,
                ))
            };
            debug!(
                scene_changed = change.scene_changed,
                viewport_changed = change.viewport_changed,
                scaled_width = self.scaled.width,
                scaled_height = self.scaled.height,
                x = self.position.x,
                y = self.position.y,
                "settings changed geometry"
            );
        }

        self.strategy
            .on_settings_changed(&scene, self.position, &change);
        change
    }

    /// Current position plus scaled size.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.position, self.scaled)
    }

    /// The visible viewport rectangle expressed in original-image pixels.
    ///
    /// Uses the ratio `original / scaled` per axis (zero on a degenerate
    /// axis). The rectangle may extend past the image when an axis is not
    /// pannable; renderers clip as needed.
    pub fn viewport_in_original_image_scale(&self) -> BoundingBox {
        let ratio = |original: f64, scaled: f64| {
            if scaled > 0.0 {
                original / scaled
            } else {
                0.0
            }
        };
        let rx = ratio(self.original.width, self.scaled.width);
        let ry = ratio(self.original.height, self.scaled.height);
        BoundingBox {
            x: -self.position.x * rx,
            y: -self.position.y * ry,
            width: self.viewport.width * rx,
            height: self.viewport.height * ry,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scaled_size(&self) -> Dimensions {
        self.scaled
    }

    pub fn viewport_size(&self) -> Dimensions {
        self.viewport
    }

    pub fn original_image_size(&self) -> Dimensions {
        self.original
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn speed_level(&self) -> f64 {
        self.speed_level
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Consumes the controller and hands back its strategy.
    pub fn into_strategy(self) -> S {
        self.strategy
    }
}
