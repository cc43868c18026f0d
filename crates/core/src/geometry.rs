//! Plain geometry value types shared by the controller and the strategies.
//!
//! All coordinates are in viewport pixels. A [`Position`] is the offset of the
//! scaled image's top-left corner relative to the viewport origin, so negative
//! values mean the image has scrolled left/up.

use serde::{Deserialize, Serialize};

/// Width and height of a viewport or image, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    /// The `(0, 0)` size produced by degenerate geometry.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either side is zero (or negative), i.e. nothing can be shown.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Offset of the scaled image relative to the viewport origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the (possibly oversized) image sits relative to the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// Combines a position and a size into one box.
    pub fn new(position: Position, size: Dimensions) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// Computes the on-screen size of the image for a viewport and zoom level.
///
/// Scaling is width-driven: the scaled width is `viewport.width * zoom` and
/// the height follows from the image's own aspect ratio. Returns
/// [`Dimensions::ZERO`] when the image has no area or the viewport has no
/// width, so callers never divide by zero.
pub fn scaled_size(viewport: Dimensions, original: Dimensions, zoom_level: f64) -> Dimensions {
    if original.is_degenerate() || viewport.width <= 0.0 {
        return Dimensions::ZERO;
    }
    let aspect_ratio = original.width / original.height;
    let width = viewport.width * zoom_level;
    Dimensions::new(width, width / aspect_ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_size_is_width_driven() {
        let s = scaled_size(
            Dimensions::new(800.0, 600.0),
            Dimensions::new(1600.0, 600.0),
            1.0,
        );
        assert!((s.width - 800.0).abs() < 1e-9);
        assert!((s.height - 300.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_size_applies_zoom_and_preserves_aspect() {
        let s = scaled_size(
            Dimensions::new(800.0, 600.0),
            Dimensions::new(400.0, 600.0),
            3.0,
        );
        assert!((s.width - 2400.0).abs() < 1e-9);
        assert!((s.height - 3600.0).abs() < 1e-6);
    }

    #[test]
    fn scaled_size_ignores_viewport_height() {
        let a = scaled_size(Dimensions::new(500.0, 10.0), Dimensions::new(4.0, 3.0), 2.0);
        let b = scaled_size(Dimensions::new(500.0, 9000.0), Dimensions::new(4.0, 3.0), 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_sized_image_yields_zero_scaled_size() {
        let vp = Dimensions::new(800.0, 600.0);
        assert_eq!(scaled_size(vp, Dimensions::new(0.0, 600.0), 2.0), Dimensions::ZERO);
        assert_eq!(scaled_size(vp, Dimensions::new(600.0, 0.0), 2.0), Dimensions::ZERO);
    }

    #[test]
    fn zero_viewport_width_yields_zero_scaled_size() {
        let s = scaled_size(Dimensions::new(0.0, 600.0), Dimensions::new(100.0, 100.0), 2.0);
        assert_eq!(s, Dimensions::ZERO);
    }

    #[test]
    fn bounding_box_splits_back_into_parts() {
        let bb = BoundingBox::new(Position::new(-3.0, 4.5), Dimensions::new(10.0, 20.0));
        assert_eq!(bb.position(), Position::new(-3.0, 4.5));
        assert_eq!(bb.size(), Dimensions::new(10.0, 20.0));
    }

    #[test]
    fn geometry_json_round_trip() {
        let bb = BoundingBox::new(Position::new(-1.5, 2.0), Dimensions::new(3.0, 4.0));
        let json = serde_json::to_string(&bb).unwrap();
        let restored: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(bb, restored);
    }
}
