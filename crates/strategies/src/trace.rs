//! PNG rendering of a viewport path.
//!
//! Feature-gated behind `png` (default on) so embedders that only need the
//! controller do not pull in the `image` crate. The raster itself comes from
//! [`crate::path`].

use std::path::Path;

use stroll_core::{BoundingBox, Dimensions, StrollError};

use crate::path::rasterize_path;

/// Writes the path of `views` over `image` as a PNG whose longer side is
/// `max_side` pixels.
///
/// Returns `StrollError::InvalidDimensions` for a degenerate image or zero
/// `max_side`, and `StrollError::Io` on write failure.
pub fn write_trace_png(
    image: Dimensions,
    views: &[BoundingBox],
    max_side: usize,
    path: &Path,
) -> Result<(), StrollError> {
    let raster = rasterize_path(image, views, max_side).ok_or(StrollError::InvalidDimensions {
        width: image.width,
        height: image.height,
    })?;
    let too_large = || StrollError::InvalidDimensions {
        width: raster.width as f64,
        height: raster.height as f64,
    };
    let w = u32::try_from(raster.width).map_err(|_| too_large())?;
    let h = u32::try_from(raster.height).map_err(|_| too_large())?;
    let img = image::RgbaImage::from_raw(w, h, raster.rgba)
        .ok_or_else(|| StrollError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| StrollError::Io(e.to_string()))
}
