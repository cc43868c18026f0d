#![deny(unsafe_code)]
//! Random-bounce strategy.
//!
//! The image drifts along a freely chosen unit heading. When it reaches the
//! end of its travel range on an axis, the heading is re-rolled: the bounced
//! component points away from the wall with a random magnitude, and on a
//! single-wall hit the component parallel to the wall is fully randomized so
//! the path does not repeat.
//!
//! All randomness comes from an injected [`RandomSource`], so tests can
//! script exact reflection outcomes.

use std::fmt;

use glam::DVec2;
use serde_json::{json, Value};
use stroll_core::params::{param_f64, param_usize};
use stroll_core::{
    MotionStrategy, Position, RandomSource, Scene, SettingsChange, Xorshift64,
};
use tracing::{debug, trace};

/// Default lower bound of the away-from-wall component after a bounce.
const DEFAULT_MIN_REFLECTION: f64 = 0.3;
/// Default number of random angles tried when a reflection comes out zero.
const DEFAULT_MAX_RETRIES: usize = 10;
/// Minimum component on the only pannable axis during retries.
const SINGLE_AXIS_MIN: f64 = 0.5;
/// Magnitude range of the last-resort escape vector.
const ESCAPE_MIN: f64 = 0.3;
const ESCAPE_MAX: f64 = 0.8;

/// Tunable parameters for [`RandomBounce`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BounceParams {
    /// Lower bound of the away-from-wall component, in `[0, 1]`.
    pub min_reflection: f64,
    /// Random angles tried before falling back to the escape vector.
    pub max_retries: usize,
}

impl Default for BounceParams {
    fn default() -> Self {
        Self {
            min_reflection: DEFAULT_MIN_REFLECTION,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl BounceParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    ///
    /// `min_reflection` is clamped to `[0, 1]`.
    pub fn from_json(params: &Value) -> Self {
        Self {
            min_reflection: param_f64(params, "min_reflection", DEFAULT_MIN_REFLECTION)
                .clamp(0.0, 1.0),
            max_retries: param_usize(params, "max_retries", DEFAULT_MAX_RETRIES),
        }
    }
}

/// Stochastic strategy: straight-line travel with randomized reflections.
///
/// The heading is always either zero or unit length.
pub struct RandomBounce {
    params: BounceParams,
    direction: DVec2,
    rng: Box<dyn RandomSource>,
}

impl fmt::Debug for RandomBounce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomBounce")
            .field("params", &self.params)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl RandomBounce {
    /// Creates the strategy with no heading. The heading is derived when the
    /// strategy is attached to a controller.
    pub fn new(params: BounceParams, rng: Box<dyn RandomSource>) -> Self {
        Self {
            params,
            direction: DVec2::ZERO,
            rng,
        }
    }

    /// Creates the strategy with default params and a seeded [`Xorshift64`].
    pub fn seeded(seed: u64) -> Self {
        Self::new(BounceParams::default(), Box::new(Xorshift64::new(seed)))
    }

    pub fn from_json(params: &Value, rng: Box<dyn RandomSource>) -> Self {
        Self::new(BounceParams::from_json(params), rng)
    }

    /// Current heading: zero or unit length.
    pub fn direction(&self) -> DVec2 {
        self.direction
    }

    /// Heads from the visible center toward a random point of the image.
    ///
    /// Returns zero only when the scene is not pannable.
    fn initial_direction(&mut self, scene: &Scene, position: Position) -> DVec2 {
        if !scene.is_pannable() {
            return DVec2::ZERO;
        }
        let center = scene.view_center_on_image(position);
        let target = DVec2::new(
            self.rng.next_f64() * scene.scaled.width,
            self.rng.next_f64() * scene.scaled.height,
        );
        let mut d = restrict_to_pannable(scene, target - DVec2::new(center.x, center.y));

        if d == DVec2::ZERO {
            d = restrict_to_pannable(scene, DVec2::from_angle(self.rng.next_angle()));
            if d == DVec2::ZERO {
                let half = SINGLE_AXIS_MIN * self.rng.next_sign();
                if scene.pannable_x() {
                    d.x = half;
                } else {
                    d.y = half;
                }
            }
        }
        d.normalize_or_zero()
    }

    /// New heading after hitting a wall at `at` (the clamped position).
    fn reflect(&mut self, scene: &Scene, at: Position, hit_x: bool, hit_y: bool) -> DVec2 {
        let (pan_x, pan_y) = (scene.pannable_x(), scene.pannable_y());
        if !pan_x && !pan_y {
            return DVec2::ZERO;
        }
        // Headings are scaled by a possibly negative speed; "away" follows its sign.
        let away = if scene.pixels_per_second() < 0.0 { -1.0 } else { 1.0 };
        let lo = self.params.min_reflection;
        let mut d = self.direction;

        if hit_x {
            if scene.at_max_x(at.x) {
                d.x = -away * self.rng.next_range(lo, 1.0);
            } else if scene.at_min_x(at.x) {
                d.x = away * self.rng.next_range(lo, 1.0);
            }
        }
        if hit_y {
            if scene.at_max_y(at.y) {
                d.y = -away * self.rng.next_range(lo, 1.0);
            } else if scene.at_min_y(at.y) {
                d.y = away * self.rng.next_range(lo, 1.0);
            }
        }

        if hit_x && !hit_y && pan_y {
            d.y = self.rng.next_range(-1.0, 1.0);
        } else if hit_y && !hit_x && pan_x {
            d.x = self.rng.next_range(-1.0, 1.0);
        }

        d = restrict_to_pannable(scene, d);

        if d == DVec2::ZERO {
            for _ in 0..self.params.max_retries {
                d = restrict_to_pannable(scene, DVec2::from_angle(self.rng.next_angle()));
                if pan_x && !pan_y && d.x.abs() < SINGLE_AXIS_MIN {
                    d.x = sign_of(d.x) * self.rng.next_range(SINGLE_AXIS_MIN, 1.0);
                }
                if pan_y && !pan_x && d.y.abs() < SINGLE_AXIS_MIN {
                    d.y = sign_of(d.y) * self.rng.next_range(SINGLE_AXIS_MIN, 1.0);
                }
                if d != DVec2::ZERO {
                    break;
                }
            }
        }

        if d == DVec2::ZERO {
            if pan_x {
                let sign = if scene.at_max_x(at.x) { -away } else { away };
                d.x = sign * self.rng.next_range(ESCAPE_MIN, ESCAPE_MAX);
            }
            if pan_y {
                let sign = if scene.at_max_y(at.y) { -away } else { away };
                d.y = sign * self.rng.next_range(ESCAPE_MIN, ESCAPE_MAX);
            }
        }
        d.normalize_or_zero()
    }
}

/// Zeroes the components of `d` on axes without travel room.
fn restrict_to_pannable(scene: &Scene, d: DVec2) -> DVec2 {
    DVec2::new(
        if scene.pannable_x() { d.x } else { 0.0 },
        if scene.pannable_y() { d.y } else { 0.0 },
    )
}

fn sign_of(v: f64) -> f64 {
    if v >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Clamps `v` into `[min, 0]`, reporting whether it had to.
fn clamp_axis(v: f64, min: f64) -> (f64, bool) {
    if v < min {
        (min, true)
    } else if v > 0.0 {
        (0.0, true)
    } else {
        (v, false)
    }
}

impl MotionStrategy for RandomBounce {
    fn name(&self) -> &'static str {
        "random-bounce"
    }

    fn attach(&mut self, scene: &Scene, position: Position) {
        self.direction = self.initial_direction(scene, position);
    }

    fn next_position(&mut self, scene: &Scene, delta_seconds: f64, position: Position) -> Position {
        if self.direction == DVec2::ZERO && scene.is_pannable() {
            self.direction = self.initial_direction(scene, position);
            debug!(dx = self.direction.x, dy = self.direction.y, "reacquired heading");
        }

        let step = self.direction * (scene.pixels_per_second() * delta_seconds);

        let (x, hit_x) = if scene.pannable_x() {
            clamp_axis(position.x + step.x, scene.min_x())
        } else {
            (scene.centered_x(), false)
        };
        let (y, hit_y) = if scene.pannable_y() {
            clamp_axis(position.y + step.y, scene.min_y())
        } else {
            (scene.centered_y(), false)
        };
        let next = Position::new(x, y);

        if hit_x || hit_y {
            self.direction = self.reflect(scene, next, hit_x, hit_y);
            trace!(
                x,
                y,
                hit_x,
                hit_y,
                dx = self.direction.x,
                dy = self.direction.y,
                "bounce"
            );
        }
        next
    }

    fn on_settings_changed(&mut self, scene: &Scene, position: Position, change: &SettingsChange) {
        if change.scene_changed {
            self.direction = self.initial_direction(scene, position);
            debug!(dx = self.direction.x, dy = self.direction.y, "heading re-derived");
        } else if change.viewport_changed {
            let adjusted = restrict_to_pannable(scene, self.direction);
            if adjusted != self.direction {
                self.direction = if adjusted == DVec2::ZERO && scene.is_pannable() {
                    self.initial_direction(scene, position)
                } else {
                    adjusted.normalize_or_zero()
                };
            }
            if !scene.is_pannable() {
                self.direction = DVec2::ZERO;
            }
        }
    }

    fn heading(&self) -> DVec2 {
        self.direction
    }

    fn params(&self) -> Value {
        json!({
            "min_reflection": self.params.min_reflection,
            "max_retries": self.params.max_retries,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "min_reflection": {
                "type": "number",
                "default": DEFAULT_MIN_REFLECTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Smallest away-from-wall component after a bounce"
            },
            "max_retries": {
                "type": "integer",
                "default": DEFAULT_MAX_RETRIES,
                "min": 0,
                "max": 100,
                "description": "Random angles tried before the deterministic escape"
            }
        })
    }
}
