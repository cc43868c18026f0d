//! Pure-computation rasterizer for a viewport path over an image.
//!
//! This module is always available (no feature gate); the `png` trace writer
//! only adds file encoding on top of it.
//!
//! The path is given as the visible region of each frame in original image
//! coordinates, so zoom changes during a run keep one consistent canvas.

use stroll_core::{BoundingBox, Dimensions};

const BACKGROUND: [u8; 4] = [20, 20, 28, 255];
const TRAIL: [u8; 4] = [235, 235, 235, 255];
const FIRST_VIEW: [u8; 4] = [80, 200, 120, 255];
const LAST_VIEW: [u8; 4] = [230, 90, 80, 255];

/// An RGBA8 raster of a viewport path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathImage {
    pub width: usize,
    pub height: usize,
    /// `width * height * 4` bytes, row-major.
    pub rgba: Vec<u8>,
}

impl PathImage {
    fn blank(width: usize, height: usize) -> Self {
        let rgba = std::iter::repeat(BACKGROUND)
            .take(width * height)
            .flatten()
            .collect();
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Color of the pixel at `(x, y)`, if inside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.rgba[i..i + 4]);
        Some(out)
    }

    fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.rgba[i..i + 4].copy_from_slice(&color);
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: [u8; 4]) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let (i, n) = (i as f64, steps as f64);
            let x = (from.0 + dx * i / n).floor() as i64;
            let y = (from.1 + dy * i / n).floor() as i64;
            self.put(x, y, color);
        }
    }

    fn outline(&mut self, left: f64, top: f64, right: f64, bottom: f64, color: [u8; 4]) {
        self.line((left, top), (right, top), color);
        self.line((right, top), (right, bottom), color);
        self.line((right, bottom), (left, bottom), color);
        self.line((left, bottom), (left, top), color);
    }
}

/// Maps a view measured against image size `from` onto image size `to`, so a
/// path that spans an image swap can share one canvas. A degenerate `from`
/// axis maps to zero.
pub fn rescale_view(view: BoundingBox, from: Dimensions, to: Dimensions) -> BoundingBox {
    let ratio = |to: f64, from: f64| if from > 0.0 { to / from } else { 0.0 };
    let (rx, ry) = (ratio(to.width, from.width), ratio(to.height, from.height));
    BoundingBox {
        x: view.x * rx,
        y: view.y * ry,
        width: view.width * rx,
        height: view.height * ry,
    }
}

/// Draws the trail of view centers plus the first and last view rectangles.
///
/// The image is scaled so its longer side spans `max_side` pixels. Returns
/// `None` if the image is degenerate or `max_side` is zero.
pub fn rasterize_path(image: Dimensions, views: &[BoundingBox], max_side: usize) -> Option<PathImage> {
    if image.is_degenerate() || max_side == 0 {
        return None;
    }
    let scale = max_side as f64 / image.width.max(image.height);
    let width = ((image.width * scale).round() as usize).max(1);
    let height = ((image.height * scale).round() as usize).max(1);
    let mut raster = PathImage::blank(width, height);

    let to_canvas = |x: f64, y: f64| (x * scale, y * scale);
    let center = |v: &BoundingBox| to_canvas(v.x + v.width / 2.0, v.y + v.height / 2.0);

    for pair in views.windows(2) {
        raster.line(center(&pair[0]), center(&pair[1]), TRAIL);
    }
    if let [only] = views {
        let (x, y) = center(only);
        raster.put(x.floor() as i64, y.floor() as i64, TRAIL);
    }

    // Inset by one pixel so a view flush with the image edge stays visible.
    let inset = |v: &BoundingBox| {
        let (l, t) = to_canvas(v.x, v.y);
        let (r, b) = to_canvas(v.x + v.width, v.y + v.height);
        (l, t, (r - 1.0).max(l), (b - 1.0).max(t))
    };
    if let Some(first) = views.first() {
        let (l, t, r, b) = inset(first);
        raster.outline(l, t, r, b, FIRST_VIEW);
    }
    if let [_, .., last] = views {
        let (l, t, r, b) = inset(last);
        raster.outline(l, t, r, b, LAST_VIEW);
    }
    Some(raster)
}
