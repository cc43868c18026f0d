//! Read-only snapshot of the geometry a strategy needs for one call.
//!
//! The controller builds a [`Scene`] from its own state before every
//! `next_position` / `on_settings_changed` call. Strategies never hold on to
//! it, so they always see the geometry that is current for that call.

use crate::geometry::{Dimensions, Position};

/// Tolerance used for pannability and "which bound was hit" tests.
///
/// Exact comparisons at the boundary oscillate because of rounding.
pub const PAN_TOLERANCE: f64 = 1e-3;

/// Viewport, scaled image size and speed for a single strategy call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub viewport: Dimensions,
    pub scaled: Dimensions,
    /// Viewport widths per second. May be negative.
    pub speed_level: f64,
}

impl Scene {
    pub fn new(viewport: Dimensions, scaled: Dimensions, speed_level: f64) -> Self {
        Self {
            viewport,
            scaled,
            speed_level,
        }
    }

    /// True if the image is wider than the viewport beyond the tolerance.
    pub fn pannable_x(&self) -> bool {
        self.scaled.width > self.viewport.width + PAN_TOLERANCE
    }

    /// True if the image is taller than the viewport beyond the tolerance.
    pub fn pannable_y(&self) -> bool {
        self.scaled.height > self.viewport.height + PAN_TOLERANCE
    }

    /// True if there is travel room on at least one axis.
    pub fn is_pannable(&self) -> bool {
        self.pannable_x() || self.pannable_y()
    }

    /// Leftmost legal x (image scrolled fully left). The right bound is 0.
    pub fn min_x(&self) -> f64 {
        self.viewport.width - self.scaled.width
    }

    /// Topmost legal y (image scrolled fully up). The bottom bound is 0.
    pub fn min_y(&self) -> f64 {
        self.viewport.height - self.scaled.height
    }

    pub fn centered_x(&self) -> f64 {
        (self.viewport.width - self.scaled.width) / 2.0
    }

    pub fn centered_y(&self) -> f64 {
        (self.viewport.height - self.scaled.height) / 2.0
    }

    pub fn centered(&self) -> Position {
        Position::new(self.centered_x(), self.centered_y())
    }

    /// Displacement per second on both axes.
    ///
    /// Vertical motion is also derived from the viewport width.
    pub fn pixels_per_second(&self) -> f64 {
        self.speed_level * self.viewport.width
    }

    /// The viewport center expressed in scaled-image coordinates.
    pub fn view_center_on_image(&self, position: Position) -> Position {
        Position::new(
            -position.x + self.viewport.width / 2.0,
            -position.y + self.viewport.height / 2.0,
        )
    }

    /// Clamps pannable axes into their travel range and centers the others.
    pub fn constrain(&self, position: Position) -> Position {
        let x = if self.pannable_x() {
            position.x.clamp(self.min_x(), 0.0)
        } else {
            self.centered_x()
        };
        let y = if self.pannable_y() {
            position.y.clamp(self.min_y(), 0.0)
        } else {
            self.centered_y()
        };
        Position::new(x, y)
    }

    /// True if `x` sits on the right bound (0) within the tolerance.
    pub fn at_max_x(&self, x: f64) -> bool {
        x >= -PAN_TOLERANCE
    }

    /// True if `x` sits on the left bound within the tolerance.
    pub fn at_min_x(&self, x: f64) -> bool {
        x <= self.min_x() + PAN_TOLERANCE
    }

    pub fn at_max_y(&self, y: f64) -> bool {
        y >= -PAN_TOLERANCE
    }

    pub fn at_min_y(&self, y: f64) -> bool {
        y <= self.min_y() + PAN_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(vw: f64, vh: f64, sw: f64, sh: f64) -> Scene {
        Scene::new(Dimensions::new(vw, vh), Dimensions::new(sw, sh), 0.1)
    }

    #[test]
    fn equal_sizes_are_not_pannable() {
        let s = scene(800.0, 600.0, 800.0, 600.0);
        assert!(!s.pannable_x());
        assert!(!s.pannable_y());
        assert!(!s.is_pannable());
    }

    #[test]
    fn overshoot_within_tolerance_is_not_pannable() {
        let s = scene(800.0, 600.0, 800.0005, 600.0);
        assert!(!s.pannable_x());
        let s = scene(800.0, 600.0, 800.01, 600.0);
        assert!(s.pannable_x());
    }

    #[test]
    fn one_pannable_axis_makes_scene_pannable() {
        let s = scene(800.0, 600.0, 800.0, 1200.0);
        assert!(!s.pannable_x());
        assert!(s.pannable_y());
        assert!(s.is_pannable());
    }

    #[test]
    fn bounds_and_center() {
        let s = scene(800.0, 600.0, 2400.0, 3600.0);
        assert_eq!(s.min_x(), -1600.0);
        assert_eq!(s.min_y(), -3000.0);
        assert_eq!(s.centered(), Position::new(-800.0, -1500.0));
    }

    #[test]
    fn pixels_per_second_uses_viewport_width_only() {
        let s = Scene::new(Dimensions::new(500.0, 9999.0), Dimensions::ZERO, 0.2);
        assert!((s.pixels_per_second() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn constrain_clamps_pannable_and_centers_the_rest() {
        let s = scene(800.0, 600.0, 2400.0, 300.0);
        let p = s.constrain(Position::new(50.0, -1000.0));
        assert_eq!(p, Position::new(0.0, 150.0));
        let p = s.constrain(Position::new(-5000.0, 0.0));
        assert_eq!(p, Position::new(-1600.0, 150.0));
    }

    #[test]
    fn view_center_maps_into_image_space() {
        let s = scene(800.0, 600.0, 2400.0, 3600.0);
        let c = s.view_center_on_image(Position::new(-100.0, -200.0));
        assert_eq!(c, Position::new(500.0, 500.0));
    }

    #[test]
    fn bound_checks_use_tolerance() {
        let s = scene(800.0, 600.0, 2400.0, 3600.0);
        assert!(s.at_max_x(-0.0005));
        assert!(!s.at_max_x(-0.01));
        assert!(s.at_min_x(-1599.9995));
        assert!(s.at_min_y(-3000.0));
        assert!(s.at_max_y(0.0));
    }
}
